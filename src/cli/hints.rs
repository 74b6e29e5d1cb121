//! Friendly names for a handful of MIB-2 OIDs.
//!
//! Not MIB support: a fixed table used to label output and to accept names
//! on the command line. Every entry stays inside the single-byte arc subset
//! the codec can encode.

use crate::Oid;

static NAMES: &[(&[u32], &str)] = &[
    (&[1, 3, 6, 1, 2, 1], "mib-2"),
    (&[1, 3, 6, 1, 2, 1, 1], "system"),
    (&[1, 3, 6, 1, 2, 1, 1, 1, 0], "sysDescr.0"),
    (&[1, 3, 6, 1, 2, 1, 1, 2, 0], "sysObjectID.0"),
    (&[1, 3, 6, 1, 2, 1, 1, 3, 0], "sysUpTime.0"),
    (&[1, 3, 6, 1, 2, 1, 1, 4, 0], "sysContact.0"),
    (&[1, 3, 6, 1, 2, 1, 1, 5, 0], "sysName.0"),
    (&[1, 3, 6, 1, 2, 1, 1, 6, 0], "sysLocation.0"),
    (&[1, 3, 6, 1, 2, 1, 1, 7, 0], "sysServices.0"),
    (&[1, 3, 6, 1, 2, 1, 2], "interfaces"),
    (&[1, 3, 6, 1, 2, 1, 2, 1, 0], "ifNumber.0"),
    (&[1, 3, 6, 1, 2, 1, 2, 2], "ifTable"),
];

/// Name for `oid`, if it is in the table.
pub fn lookup(oid: &Oid) -> Option<&'static str> {
    let arcs = oid.arcs();
    NAMES
        .iter()
        .find(|(pattern, _)| *pattern == arcs)
        .map(|(_, name)| *name)
}

/// Parse dotted notation (`1.3.6.1.2.1.1.1.0`, leading dot allowed) or a
/// table name (`sysDescr.0`, case-insensitive).
pub fn parse_oid(s: &str) -> Result<Oid, String> {
    let dotted = s.strip_prefix('.').unwrap_or(s);
    if dotted.starts_with(|c: char| c.is_ascii_digit()) {
        return Oid::parse(dotted).map_err(|e| format!("invalid OID '{}': {}", s, e));
    }

    NAMES
        .iter()
        .find(|(_, name)| name.eq_ignore_ascii_case(s))
        .map(|(arcs, _)| Oid::from_slice(arcs))
        .ok_or_else(|| {
            format!(
                "unknown OID name '{}'; use dotted notation (e.g., 1.3.6.1.2.1.1.1.0)",
                s
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(
            lookup(&Oid::from_slice(&[1, 3, 6, 1, 2, 1, 1, 5, 0])),
            Some("sysName.0")
        );
        assert_eq!(lookup(&Oid::from_slice(&[1, 3, 6, 1, 99])), None);
    }

    #[test]
    fn test_parse_dotted() {
        assert_eq!(
            parse_oid("1.3.6.1.2.1.1.1.0").unwrap().arcs(),
            &[1, 3, 6, 1, 2, 1, 1, 1, 0]
        );
        assert_eq!(parse_oid(".1.3.6.1.2.1").unwrap().arcs(), &[1, 3, 6, 1, 2, 1]);
        assert!(parse_oid("1.3..6").is_err());
    }

    #[test]
    fn test_parse_name() {
        assert_eq!(parse_oid("SYSDESCR.0").unwrap().arcs(), &[1, 3, 6, 1, 2, 1, 1, 1, 0]);
        assert_eq!(parse_oid("mib-2").unwrap().arcs(), &[1, 3, 6, 1, 2, 1]);
        assert!(parse_oid("unknownOid").is_err());
    }

    #[test]
    fn test_every_entry_encodes() {
        for (arcs, name) in NAMES {
            assert!(Oid::from_slice(arcs).to_ber().is_ok(), "{}", name);
        }
    }
}
