//! Open-source license catalog

use serde::Serialize;

/// License identifiers treated as open source.
pub const OPEN_SOURCE_LICENSES: [&str; 12] = [
    "MIT",
    "Apache-2.0",
    "GPL-3.0",
    "GPL-2.0",
    "BSD-3-Clause",
    "BSD-2-Clause",
    "ISC",
    "Mozilla Public License 2.0",
    "LGPL-3.0",
    "LGPL-2.1",
    "Unlicense",
    "CC0-1.0",
];

/// Human-readable description of a license.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LicenseInfo {
    pub name: String,
    pub description: String,
    /// Empty for licenses outside the catalog
    pub url: String,
}

/// Catalog entries: SPDX id, display name, description.
const LICENSE_DETAILS: [(&str, &str, &str); 5] = [
    ("MIT", "MIT License", "Very permissive; commercial use allowed"),
    (
        "Apache-2.0",
        "Apache License 2.0",
        "Permissive with an explicit patent grant",
    ),
    (
        "GPL-3.0",
        "GNU General Public License v3.0",
        "Copyleft; derivative works must use the same license",
    ),
    ("BSD-3-Clause", "BSD 3-Clause License", "Short and permissive"),
    ("ISC", "ISC License", "Very permissive, functionally similar to MIT"),
];

/// Whether `license` is one of [`OPEN_SOURCE_LICENSES`].
///
/// Matching ignores ASCII case, so GitHub's lowercase keys (`mit`,
/// `apache-2.0`) are recognized too.
#[must_use]
pub fn is_open_source_license(license: Option<&str>) -> bool {
    license.is_some_and(|l| OPEN_SOURCE_LICENSES.iter().any(|k| k.eq_ignore_ascii_case(l)))
}

/// Description for a license identifier, or `None` without one.
///
/// Identifiers outside the catalog are described generically under their
/// own name.
#[must_use]
pub fn license_info(key: Option<&str>) -> Option<LicenseInfo> {
    let key = key?;
    let info = match LICENSE_DETAILS
        .iter()
        .find(|(id, _, _)| id.eq_ignore_ascii_case(key))
    {
        Some((id, name, description)) => LicenseInfo {
            name: (*name).to_string(),
            description: (*description).to_string(),
            url: format!("https://opensource.org/licenses/{id}"),
        },
        None => LicenseInfo {
            name: key.to_string(),
            description: "Other open-source license".to_string(),
            url: String::new(),
        },
    };
    Some(info)
}
