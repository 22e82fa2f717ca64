//! Static service catalog.
//!
//! The catalog is configuration, not user data: it is loaded once at
//! process start (from YAML when a file is present, otherwise the
//! built-in list) and never edited at runtime.

use std::path::Path;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use tracing::info;

use crate::domain::models::{Service, ServiceCategory};

/// Built-in service list used when no catalog file is provided
static DEFAULT_SERVICES: Lazy<Vec<Service>> = Lazy::new(|| {
    vec![
        Service {
            id: "brow-shaping".to_string(),
            name: "Brow Shaping & Tint".to_string(),
            price: 35.0,
            duration_minutes: 30,
            description: "Shaping with wax or tweezers plus a tint matched to your color".to_string(),
            category: ServiceCategory::Brows,
        },
        Service {
            id: "brow-lamination".to_string(),
            name: "Brow Lamination".to_string(),
            price: 55.0,
            duration_minutes: 60,
            description: "Restructuring treatment that sets brows in a fuller shape".to_string(),
            category: ServiceCategory::Brows,
        },
        Service {
            id: "lash-lift".to_string(),
            name: "Lash Lift & Tint".to_string(),
            price: 65.0,
            duration_minutes: 60,
            description: "Curl and tint for your natural lashes, lasts 6-8 weeks".to_string(),
            category: ServiceCategory::Lashes,
        },
        Service {
            id: "lash-classic".to_string(),
            name: "Classic Lash Extensions".to_string(),
            price: 95.0,
            duration_minutes: 120,
            description: "One extension per natural lash for everyday length".to_string(),
            category: ServiceCategory::Lashes,
        },
        Service {
            id: "lash-refill".to_string(),
            name: "Lash Refill".to_string(),
            price: 55.0,
            duration_minutes: 90,
            description: "Refill for existing extensions within three weeks".to_string(),
            category: ServiceCategory::Lashes,
        },
        Service {
            id: "brow-lash-combo".to_string(),
            name: "Brow & Lash Combo".to_string(),
            price: 110.0,
            duration_minutes: 90,
            description: "Brow lamination and lash lift in one appointment".to_string(),
            category: ServiceCategory::Combo,
        },
    ]
});

/// Read-only catalog of bookable services
#[derive(Debug, Clone)]
pub struct ServiceCatalog {
    services: Vec<Service>,
}

impl Default for ServiceCatalog {
    fn default() -> Self {
        Self {
            services: DEFAULT_SERVICES.clone(),
        }
    }
}

impl ServiceCatalog {
    /// Load the catalog from a YAML file, falling back to the built-in
    /// list when the file does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!("No catalog file at {}, using built-in services", path.display());
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
        let services: Vec<Service> = serde_yaml::from_str(&raw)
            .with_context(|| format!("Failed to parse catalog file {}", path.display()))?;
        if services.is_empty() {
            anyhow::bail!("Catalog file {} contains no services", path.display());
        }
        info!("Loaded {} services from {}", services.len(), path.display());
        Ok(Self { services })
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn find(&self, service_id: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.id == service_id)
    }

    /// Duration in minutes for a service referenced by display name, as
    /// stored on booked ranges. `None` for an unknown name; the slot
    /// engine decides what an unrecognized booking blocks.
    pub fn duration_for_name(&self, service_name: &str) -> Option<u32> {
        self.services
            .iter()
            .find(|s| s.name == service_name)
            .map(|s| s.duration_minutes)
    }
}
