//! Virtual-interface classification heuristics.
//!
//! Interface names carry strong platform conventions: `docker0` is a
//! container bridge, `utun3` a macOS tunnel, `eth0.100` a VLAN
//! sub-interface. The primary classifier works from those conventions
//! alone. A secondary classifier matches adapter description strings for
//! platforms (Windows, mainly) where names are opaque identifiers and the
//! description is the only usable signal.

/// Names that denote a virtual device regardless of any prefix rule.
///
/// `any` is the capture-on-all pseudo-device; `lo` and `lo0` are the
/// loopback spellings on Linux and the BSDs.
const VIRTUAL_EXACT: &[&str] = &["any", "lo", "lo0"];

/// Name prefixes of software-defined interfaces.
const VIRTUAL_PREFIXES: &[&str] = &[
    "tun",     // tunnel devices, VPNs
    "tap",     // layer-2 tunnels, VM NICs
    "veth",    // container ethernet pairs
    "br",      // bridges
    "docker",  // Docker bridges
    "virbr",   // libvirt bridges
    "vmnet",   // VMware host networks
    "vboxnet", // VirtualBox host-only networks
    "utun",    // macOS user-space tunnels
    "bond",    // bonded masters
    "team",    // teamed masters
    "gre",     // GRE tunnels
    "ipsec",   // IPsec tunnels
    "ppp",     // point-to-point links
    "nas",     // ATM bridging
    "awdl",    // Apple Wireless Direct Link
    "llw",     // Apple low-latency WLAN
    "gif",     // BSD generic tunnels
    "stf",     // BSD 6to4 tunnels
    "p2p",     // Wi-Fi Direct
    "ap",      // access-point mode
    "anpi",    // Apple debug bridge
    "faith",   // BSD IPv6-to-IPv4 relay
    "wg",      // WireGuard
    "ip_vti",  // Linux virtual tunnel interfaces
];

/// Adapter-description substrings that betray virtual, VPN, or hypervisor
/// drivers. Matched case-insensitively.
const VIRTUAL_DESCRIPTIONS: &[&str] = &[
    "virtual",
    "loopback",
    "tap-",
    "tap adapter",
    "wan miniport",
    "hyper-v",
    "vmware",
    "virtualbox",
    "vbox",
    "pptp",
    "l2tp",
    "ikev2",
    "sstp",
    "anchorfree",
    "kernel debug",
];

/// Classify an interface name as likely virtual.
///
/// Pure and total: any input produces an answer, and an empty name is
/// physical. Rules apply in order with the first match winning: exact
/// names, known prefixes, then the `parent.<vlan-id>` suffix convention.
pub fn is_likely_virtual(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    if VIRTUAL_EXACT.contains(&name) {
        return true;
    }
    for prefix in VIRTUAL_PREFIXES {
        if !name.starts_with(prefix) {
            continue;
        }
        // A bare `lo` entry would also match names like "london0"; accept
        // it only for `lo` itself or `lo<digit>` spellings.
        if *prefix == "lo" && !is_loopback_spelling(name) {
            continue;
        }
        return true;
    }
    has_vlan_suffix(name)
}

fn is_loopback_spelling(name: &str) -> bool {
    name == "lo" || name.as_bytes().get(2).is_some_and(|b| b.is_ascii_digit())
}

/// `eth0.100`-style names: a dot followed by a pure-decimal VLAN id.
fn has_vlan_suffix(name: &str) -> bool {
    match name.rfind('.') {
        Some(dot) if dot + 1 < name.len() => {
            name[dot + 1..].bytes().all(|b| b.is_ascii_digit())
        }
        _ => false,
    }
}

/// Classify an adapter description string as denoting a virtual device.
///
/// Case-insensitive substring match with the same pure, total contract as
/// [`is_likely_virtual`]; an empty description is physical.
pub fn is_virtual_description(description: &str) -> bool {
    if description.is_empty() {
        return false;
    }
    let lower = description.to_lowercase();
    VIRTUAL_DESCRIPTIONS.iter().any(|needle| lower.contains(needle))
}

/// Combined classifier: name rules first, description fallback second.
///
/// The fallback only matters on platforms that populate descriptions;
/// elsewhere it sees an empty string and stays silent.
pub fn is_virtual_interface(name: &str, description: &str) -> bool {
    is_likely_virtual(name) || is_virtual_description(description)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_virtual_prefixes() {
        for name in ["docker0", "veth1234ab", "tun0", "br-f2a1", "virbr0", "wg0", "utun3", "awdl0"] {
            assert!(is_likely_virtual(name), "{name} should classify as virtual");
        }
    }

    #[test]
    fn test_physical_names() {
        for name in ["eth0", "en0", "wlan0", "enp3s0", "eno1", "Wi-Fi"] {
            assert!(!is_likely_virtual(name), "{name} should classify as physical");
        }
    }

    #[test]
    fn test_exact_names() {
        assert!(is_likely_virtual("any"));
        assert!(is_likely_virtual("lo"));
        assert!(is_likely_virtual("lo0"));
    }

    #[test]
    fn test_loopback_guard_spellings() {
        assert!(is_loopback_spelling("lo"));
        assert!(is_loopback_spelling("lo0"));
        assert!(!is_loopback_spelling("london0"));
    }

    #[test]
    fn test_vlan_suffix() {
        assert!(is_likely_virtual("eth0.100"));
        assert!(is_likely_virtual("enp3s0.2"));
        assert!(!is_likely_virtual("eth0.abc"));
        assert!(!is_likely_virtual("eth0."));
        assert!(!is_likely_virtual("eth0"));
    }

    #[test]
    fn test_empty_name_is_physical() {
        assert!(!is_likely_virtual(""));
    }

    #[test]
    fn test_description_fallback() {
        assert!(is_virtual_description("TAP-Windows Adapter V9"));
        assert!(is_virtual_description("Hyper-V Virtual Ethernet Adapter"));
        assert!(is_virtual_description("WAN Miniport (IKEv2)"));
        assert!(!is_virtual_description("Intel(R) Ethernet Connection I219-LM"));
        assert!(!is_virtual_description(""));
    }

    #[test]
    fn test_combined_classifier() {
        assert!(is_virtual_interface("tun0", ""));
        assert!(is_virtual_interface("ethernet_32774", "VMware Virtual Ethernet Adapter"));
        assert!(!is_virtual_interface("eth0", "Intel(R) Ethernet Connection"));
    }
}
