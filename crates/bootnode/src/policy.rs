//! # Network Restriction Policy
//!
//! Compiles `--netrestrict` and `--network` into the pieces of a
//! [`RestrictionPolicy`]. Empty input means no restriction.

use bn_discovery::{FilterError, Netlist, NetlistError, NodeFilter};

pub use bn_discovery::RestrictionPolicy;

/// Compile a comma-separated CIDR list.
pub fn compile_netlist(text: &str) -> Result<Option<Netlist>, NetlistError> {
    let netlist = Netlist::parse(text)?;
    Ok((!netlist.is_empty()).then_some(netlist))
}

/// Compile a network tag into a record filter.
pub fn compile_filter(tag: &str) -> Result<Option<NodeFilter>, FilterError> {
    if tag.is_empty() {
        return Ok(None);
    }
    NodeFilter::new(tag).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::IpAddr;

    #[test]
    fn test_empty_netlist_is_unrestricted() {
        assert_eq!(compile_netlist("").unwrap(), None);
        assert_eq!(compile_netlist(" , ").unwrap(), None);

        let policy = RestrictionPolicy::new(compile_netlist("").unwrap(), None);
        assert!(policy.allows_ip(&"0.0.0.0".parse::<IpAddr>().unwrap()));
        assert!(policy.allows_ip(&"::".parse::<IpAddr>().unwrap()));
    }

    #[test]
    fn test_netlist_compiles() {
        let netlist = compile_netlist("10.0.0.0/8, 192.168.0.0/16").unwrap().unwrap();
        assert!(netlist.contains(&"10.2.3.4".parse().unwrap()));
        assert!(!netlist.contains(&"8.8.8.8".parse().unwrap()));
    }

    #[test]
    fn test_netlist_error() {
        assert!(compile_netlist("10.0.0.0/8,nonsense").is_err());
    }

    #[test]
    fn test_filter() {
        assert_eq!(compile_filter("").unwrap(), None);
        assert_eq!(compile_filter("bsc").unwrap().unwrap().network().chain_id(), 56);
        assert_eq!(
            compile_filter("mainnet"),
            Err(FilterError::UnknownNetwork("mainnet".into()))
        );
    }
}
