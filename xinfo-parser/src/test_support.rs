//! Builders for the descriptors used across the unit tests.

pub(crate) const FINGERPRINT: &str = "B2289C3EAB83ECD6EB916A2F481A02E6B76A0A48";

pub(crate) const SIGNATURE_BLOB: &str = "
K5FSywk7qvw/boA4DQcqkls6Ize5vcBYfhQ8JnOeRQC9+uDxbnpm3qaYN9jZ8myj
k0d2aofcVbHr4fPQOSST0LXDrhFl5Fqo5um296zpJGvRUeO6S44U/EfJAGShtqWw
7LZqklu+gVvhMKREpchVqlAwXkWR44VENm24Hs+mT3M=
";

fn mandatory() -> [(&'static str, String); 3] {
    [
        ("extra-info", format!("ninja {FINGERPRINT}")),
        ("published", "2012-05-05 17:03:50".to_string()),
        (
            "router-signature",
            format!("\n-----BEGIN SIGNATURE-----{SIGNATURE_BLOB}-----END SIGNATURE-----"),
        ),
    ]
}

/// A minimal descriptor where `attrs` override the mandatory values or are added right
/// before `router-signature`.
pub(crate) fn descriptor(attrs: &[(&str, &str)]) -> String {
    descriptor_without(attrs, &[])
}

/// Same as [`descriptor`], leaving out the mandatory lines named in `exclude`.
pub(crate) fn descriptor_without(attrs: &[(&str, &str)], exclude: &[&str]) -> String {
    let mut lines = Vec::new();
    for (keyword, default) in mandatory() {
        if exclude.contains(&keyword) {
            continue;
        }
        if keyword == "router-signature" {
            lines.extend(
                attrs
                    .iter()
                    .filter(|(name, _)| !mandatory().iter().any(|(known, _)| known == name))
                    .map(|(name, value)| format!("{name} {value}")),
            );
        }
        let value = attrs
            .iter()
            .find(|(name, _)| *name == keyword)
            .map_or(default, |(_, value)| (*value).to_string());
        lines.push(format!("{keyword} {value}"));
    }
    lines.join("\n")
}
