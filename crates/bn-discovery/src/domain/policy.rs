//! Restriction policy handed to the discovery engines.

use std::net::IpAddr;

use super::filter::NodeFilter;
use super::netlist::Netlist;
use super::record::NodeRecord;

/// Optional CIDR allow-list plus optional network-tag filter.
///
/// A missing component imposes no restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestrictionPolicy {
    pub allow: Option<Netlist>,
    pub filter: Option<NodeFilter>,
}

impl RestrictionPolicy {
    pub fn new(allow: Option<Netlist>, filter: Option<NodeFilter>) -> Self {
        Self { allow, filter }
    }

    /// Policy that admits everything.
    pub fn unrestricted() -> Self {
        Self::default()
    }

    /// Check an address against the allow-list.
    pub fn allows_ip(&self, ip: &IpAddr) -> bool {
        self.allow.as_ref().map_or(true, |list| list.contains(ip))
    }

    /// Check a record against both the allow-list and the filter.
    pub fn accepts(&self, record: &NodeRecord) -> bool {
        self.allows_ip(&record.ip) && self.filter.map_or(true, |f| f.matches(record))
    }
}
