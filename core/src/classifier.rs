use std::net::Ipv4Addr;

use eolaudit_common::audit::inventory::{Inventory, UNKNOWN_OS};

/// Maps addresses to operating system labels using a static inventory.
///
/// No traffic is inspected: a host missing from the inventory is unknown.
#[derive(Debug, Clone, Default)]
pub struct HostClassifier {
    inventory: Inventory,
}

impl HostClassifier {
    pub fn new(inventory: Inventory) -> Self {
        Self { inventory }
    }

    pub fn classify(&self, ip: Ipv4Addr) -> &str {
        self.inventory.get(&ip).unwrap_or(UNKNOWN_OS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_hosts_get_their_label() {
        let classifier = HostClassifier::new(Inventory::builtin());
        assert_eq!(classifier.classify(Ipv4Addr::new(192, 168, 10, 21)), "Ubuntu 20.04 LTS");
        assert_eq!(classifier.classify(Ipv4Addr::new(192, 168, 10, 50)), "Windows Server 2019");
    }

    #[test]
    fn unmapped_hosts_are_unknown() {
        let classifier = HostClassifier::new(Inventory::builtin());
        assert_eq!(classifier.classify(Ipv4Addr::new(192, 168, 10, 2)), UNKNOWN_OS);

        let empty = HostClassifier::default();
        assert_eq!(empty.classify(Ipv4Addr::new(192, 168, 10, 10)), UNKNOWN_OS);
    }
}
