//! Static tables of the audit.
//!
//! The [`Inventory`] tells which operating system runs on a known address and
//! the [`LifecycleMapping`] tells under which product/cycle the lifecycle
//! service knows that operating system. Both are plain data: they are built
//! once (built-in defaults or configuration) and injected where needed.

use std::collections::HashMap;
use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

/// Label given to hosts missing from the inventory.
pub const UNKNOWN_OS: &str = "OS Inconnu";

const BUILTIN_HOSTS: &[(Ipv4Addr, &str)] = &[
    (Ipv4Addr::new(192, 168, 10, 10), "Windows Server 2016"),
    (Ipv4Addr::new(192, 168, 10, 11), "Windows Server 2016"),
    (Ipv4Addr::new(192, 168, 10, 21), "Ubuntu 20.04 LTS"),
    (Ipv4Addr::new(192, 168, 10, 22), "Ubuntu 20.04 LTS"),
    (Ipv4Addr::new(192, 168, 10, 40), "CentOS 7"),
    (Ipv4Addr::new(192, 168, 10, 50), "Windows Server 2019"),
];

const BUILTIN_PRODUCTS: &[(&str, &str, &str)] = &[
    ("Windows Server 2016", "windows-server", "2016"),
    ("Windows Server 2019", "windows-server", "2019"),
    ("Ubuntu 20.04 LTS", "ubuntu", "20.04"),
    ("CentOS 7", "centos", "7"),
    ("Windows 10", "windows", "10"),
    ("ESXi 6.5", "vmware-esxi", "6.5"),
];

/// Known hosts of the audited networks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    hosts: HashMap<Ipv4Addr, String>,
}

impl Inventory {
    pub fn new(hosts: impl IntoIterator<Item = (Ipv4Addr, String)>) -> Self {
        Self {
            hosts: hosts.into_iter().collect(),
        }
    }

    pub fn builtin() -> Self {
        Self::new(
            BUILTIN_HOSTS
                .iter()
                .map(|(ip, label)| (*ip, label.to_string())),
        )
    }

    pub fn get(&self, ip: &Ipv4Addr) -> Option<&str> {
        self.hosts.get(ip).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}

/// Identifies an operating system on the lifecycle service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductRef {
    pub product: String,
    pub cycle: String,
}

impl ProductRef {
    pub fn new(product: impl Into<String>, cycle: impl Into<String>) -> Self {
        Self {
            product: product.into(),
            cycle: cycle.into(),
        }
    }
}

/// OS label → lifecycle product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LifecycleMapping {
    products: HashMap<String, ProductRef>,
}

impl LifecycleMapping {
    pub fn new(products: impl IntoIterator<Item = (String, ProductRef)>) -> Self {
        Self {
            products: products.into_iter().collect(),
        }
    }

    pub fn builtin() -> Self {
        Self::new(
            BUILTIN_PRODUCTS
                .iter()
                .map(|(label, product, cycle)| (label.to_string(), ProductRef::new(*product, *cycle))),
        )
    }

    pub fn get(&self, os_label: &str) -> Option<&ProductRef> {
        self.products.get(os_label)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
