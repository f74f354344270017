use super::catalog::Catalog;
use super::catalog::Project;
use super::disclosure::Disclosure;
use super::mount_gate::MountGate;
use super::navigation::Location;
use super::theme::ThemeResolver;

/// State owned by one rendered page surface.
#[derive(Debug, Clone)]
pub struct SiteState {
    pub location: Location,
    pub theme: ThemeResolver,
    pub mount: MountGate,
    pub menu: Disclosure,
    pub catalog: Catalog,
}

impl SiteState {
    pub fn new(catalog: Catalog, theme: ThemeResolver, location: Location) -> Self {
        Self {
            location,
            theme,
            mount: MountGate::new(),
            menu: Disclosure::new(),
            catalog,
        }
    }

    pub fn active_filter(&self) -> Option<&str> {
        self.location.filter.as_deref()
    }

    /// Projects the listing page renders for the current location.
    pub fn visible_projects(&self) -> Vec<&Project> {
        self.catalog.filter(self.active_filter())
    }
}
