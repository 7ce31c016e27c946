//! Reusable client-side filters for the `*_matching` and `find_*` operations
//!
//! ```rust,ignore
//! let prod = cloud
//!     .find_virtual_datacenter(predicates::name_is::<VirtualDatacenter>("prod"))
//!     .await?;
//! ```

use crate::domain::{DomainObject, Named, VirtualAppliance, VirtualMachine};

/// Exact name match
pub fn name_is<T: Named>(name: impl Into<String>) -> impl Fn(&T) -> bool + Send + Sync + Clone {
    let name = name.into();
    move |object: &T| object.name() == name
}

/// Name equal to any of `names`
pub fn name_in<T: Named>(names: &[&str]) -> impl Fn(&T) -> bool + Send + Sync + Clone {
    let names: Vec<String> = names.iter().map(|n| (*n).to_string()).collect();
    move |object: &T| names.iter().any(|n| n == object.name())
}

/// Case-insensitive substring match on the name
pub fn name_contains<T: Named>(
    fragment: impl Into<String>,
) -> impl Fn(&T) -> bool + Send + Sync + Clone {
    let fragment = fragment.into().to_lowercase();
    move |object: &T| object.name().to_lowercase().contains(&fragment)
}

/// Identity in `ids`
pub fn id_in<T: DomainObject>(ids: Vec<T::Id>) -> impl Fn(&T) -> bool + Send + Sync + Clone {
    move |object: &T| object.id().is_some_and(|id| ids.contains(&id))
}

/// Virtual machines in the given state, e.g. `ON` or `OFF`
pub fn vm_state(state: impl Into<String>) -> impl Fn(&VirtualMachine) -> bool + Send + Sync + Clone {
    let state = state.into();
    move |vm: &VirtualMachine| vm.state() == Some(state.as_str())
}

/// Virtual appliances in the given state, e.g. `DEPLOYED`
pub fn vapp_state(
    state: impl Into<String>,
) -> impl Fn(&VirtualAppliance) -> bool + Send + Sync + Clone {
    let state = state.into();
    move |vapp: &VirtualAppliance| vapp.state() == Some(state.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tests::{offline_context, vdc_dto};
    use crate::domain::{VirtualDatacenter, wrap};
    use crate::dto::VirtualMachineDto;

    fn vdc(id: i32, name: &str) -> VirtualDatacenter {
        wrap(&offline_context(), vdc_dto(id, name)).unwrap()
    }

    #[test]
    fn test_name_predicates() {
        let prod = vdc(1, "Prod-EU");

        assert!(name_is::<VirtualDatacenter>("Prod-EU")(&prod));
        assert!(!name_is::<VirtualDatacenter>("prod-eu")(&prod));
        assert!(name_in::<VirtualDatacenter>(&["dev", "Prod-EU"])(&prod));
        assert!(!name_in::<VirtualDatacenter>(&[])(&prod));
        assert!(name_contains::<VirtualDatacenter>("prod")(&prod));
        assert!(!name_contains::<VirtualDatacenter>("staging")(&prod));
    }

    #[test]
    fn test_id_in() {
        let predicate = id_in::<VirtualDatacenter>(vec![1, 3]);
        assert!(predicate(&vdc(1, "a")));
        assert!(!predicate(&vdc(2, "b")));
    }

    #[test]
    fn test_vm_state() {
        let vm: VirtualMachine = wrap(
            &offline_context(),
            VirtualMachineDto {
                id: Some(1),
                state: Some("ON".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

        assert!(vm_state("ON")(&vm));
        assert!(!vm_state("OFF")(&vm));
    }
}
