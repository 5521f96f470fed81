use colored::*;
use eolaudit_common::config::Settings;
use eolaudit_common::network::range;

use crate::terminal::{colors, format::Detail, print};

pub fn profiles(settings: &Settings) {
    if settings.profiles.is_empty() {
        print::print_status("No scan profile configured");
        return;
    }

    for (idx, profile) in settings.profiles.iter().enumerate() {
        print::tree_head(idx, &profile.network_name);

        let hosts: ColoredString = match range::usable_hosts(&profile.cidr) {
            Ok(hosts) => hosts.len().to_string().color(colors::ACCENT),
            Err(e) => e.to_string().red(),
        };
        let details: Vec<Detail> = vec![
            ("CIDR".to_string(), profile.cidr.color(colors::IPV4_ADDR)),
            ("Hosts".to_string(), hosts),
        ];
        print::as_tree_one_level(details);
    }

    print::fat_separator();
    let ports: Vec<u16> = settings.ports.to_vec();
    print::print_status(format!(
        "{} inventory hosts, {} lifecycle products, ports {:?}",
        settings.inventory.len(),
        settings.lifecycle_mapping.len(),
        ports
    ));
}
