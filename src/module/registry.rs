//! Ordered collection of all modules known to the workbench, with the
//! pagination arithmetic used by the home screen.

use super::ModuleRef;
use crate::error::{WorkbenchError, WorkbenchResult};
use tracing::trace;

#[derive(Debug)]
pub struct ModuleRegistry {
    modules: Vec<ModuleRef>,
    modules_per_page: usize,
}

impl ModuleRegistry {
    /// Create an empty registry showing `modules_per_page` tiles per page
    pub fn new(modules_per_page: usize) -> WorkbenchResult<Self> {
        if modules_per_page == 0 {
            return Err(WorkbenchError::InvalidConfig(
                "modules_per_page must be greater than 0".to_string(),
            ));
        }

        Ok(Self {
            modules: Vec::new(),
            modules_per_page,
        })
    }

    /// Append modules in order. The whole batch is rejected if any module is
    /// already registered or appears twice in the batch.
    pub fn add<I>(&mut self, modules: I) -> WorkbenchResult<()>
    where
        I: IntoIterator<Item = ModuleRef>,
    {
        let batch: Vec<ModuleRef> = modules.into_iter().collect();

        for (i, module) in batch.iter().enumerate() {
            if self.contains(module) || batch[..i].contains(module) {
                return Err(WorkbenchError::DuplicateModule(module.label()));
            }
        }

        trace!("Registering {} module(s)", batch.len());
        self.modules.extend(batch);
        Ok(())
    }

    /// Remove a module, returning whether it was registered
    pub fn remove(&mut self, module: &ModuleRef) -> bool {
        match self.position(module) {
            Some(index) => {
                self.modules.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, module: &ModuleRef) -> bool {
        self.modules.contains(module)
    }

    pub fn position(&self, module: &ModuleRef) -> Option<usize> {
        self.modules.iter().position(|m| m == module)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn modules(&self) -> &[ModuleRef] {
        &self.modules
    }

    pub fn modules_per_page(&self) -> usize {
        self.modules_per_page
    }

    /// Module at a flattened index across all pages
    pub fn module_at(&self, index: usize) -> WorkbenchResult<&ModuleRef> {
        self.modules.get(index).ok_or(WorkbenchError::IndexOutOfRange {
            index,
            len: self.modules.len(),
        })
    }

    /// Amount of home-screen pages. Each page is filled up to
    /// `modules_per_page` tiles; a partially filled last page still counts.
    pub fn page_count(&self) -> usize {
        let count = self.modules.len();
        if count % self.modules_per_page == 0 {
            count / self.modules_per_page
        } else {
            count / self.modules_per_page + 1
        }
    }

    /// Modules shown on page `page_index`. An empty registry has a single
    /// empty page 0.
    pub fn page(&self, page_index: usize) -> WorkbenchResult<&[ModuleRef]> {
        if self.modules.is_empty() && page_index == 0 {
            return Ok(&[]);
        }

        let pages = self.page_count();
        if page_index >= pages {
            return Err(WorkbenchError::IndexOutOfRange {
                index: page_index,
                len: pages,
            });
        }

        let start = page_index * self.modules_per_page;
        let end = (start + self.modules_per_page).min(self.modules.len());
        Ok(&self.modules[start..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::BasicModule;

    fn modules(count: usize) -> Vec<ModuleRef> {
        (0..count)
            .map(|i| BasicModule::new(format!("Module {i}")).into_ref())
            .collect()
    }

    fn registry(count: usize, per_page: usize) -> ModuleRegistry {
        let mut registry = ModuleRegistry::new(per_page).unwrap();
        registry.add(modules(count)).unwrap();
        registry
    }

    #[test]
    fn test_zero_per_page_is_rejected() {
        assert!(matches!(
            ModuleRegistry::new(0),
            Err(WorkbenchError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_page_count_rounds_up() {
        for count in 0..=25 {
            for per_page in 1..=10 {
                let registry = registry(count, per_page);
                let expected = (count + per_page - 1) / per_page;
                assert_eq!(registry.page_count(), expected, "{count} modules / {per_page}");

                let total: usize = (0..registry.page_count())
                    .map(|p| registry.page(p).unwrap().len())
                    .sum();
                assert_eq!(total, count);
            }
        }
    }

    #[test]
    fn test_page_slices_keep_registration_order() {
        let registry = registry(7, 3);
        let all = registry.modules().to_vec();

        assert_eq!(registry.page(0).unwrap(), &all[0..3]);
        assert_eq!(registry.page(1).unwrap(), &all[3..6]);
        assert_eq!(registry.page(2).unwrap(), &all[6..7]);
        assert!(matches!(
            registry.page(3),
            Err(WorkbenchError::IndexOutOfRange { index: 3, len: 3 })
        ));
    }

    #[test]
    fn test_empty_registry_pages() {
        let registry = registry(0, 9);
        assert_eq!(registry.page_count(), 0);
        assert!(registry.page(0).unwrap().is_empty());
        assert!(registry.page(1).is_err());
    }

    #[test]
    fn test_module_at() {
        let registry = registry(4, 2);
        assert_eq!(registry.module_at(3).unwrap(), &registry.modules()[3]);
        assert!(matches!(
            registry.module_at(4),
            Err(WorkbenchError::IndexOutOfRange { index: 4, len: 4 })
        ));
    }

    #[test]
    fn test_duplicates_are_rejected() {
        let mut registry = ModuleRegistry::new(9).unwrap();
        let module = BasicModule::new("Calendar").into_ref();
        registry.add([module.clone()]).unwrap();

        assert!(matches!(
            registry.add([module.clone()]),
            Err(WorkbenchError::DuplicateModule(_))
        ));

        let other = BasicModule::new("Mail").into_ref();
        assert!(registry.add([other.clone(), other.clone()]).is_err());
        assert_eq!(registry.len(), 1);
        assert!(!registry.contains(&other));
    }

    #[test]
    fn test_remove() {
        let mut registry = registry(3, 9);
        let second = registry.modules()[1].clone();
        assert!(registry.remove(&second));
        assert!(!registry.remove(&second));
        assert_eq!(registry.len(), 2);
    }
}
