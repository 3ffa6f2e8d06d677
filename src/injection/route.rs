//! Path-prefix routing table.

/// Simulated upstream behavior selected for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    Forbidden,
    NotFound,
    Hang,
    Unavailable,
    Xml,
    ResetCounter,
    EachThirdOthers503,
    EachThirdOthersHang,
    Ok,
}

impl Behavior {
    /// Short name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Behavior::Forbidden => "forbidden",
            Behavior::NotFound => "not_found",
            Behavior::Hang => "hang",
            Behavior::Unavailable => "unavailable",
            Behavior::Xml => "xml",
            Behavior::ResetCounter => "reset_counter",
            Behavior::EachThirdOthers503 => "each_third_others_503",
            Behavior::EachThirdOthersHang => "each_third_others_hang",
            Behavior::Ok => "ok",
        }
    }
}

/// Checked top to bottom, first matching prefix wins.
pub const ROUTES: &[(&str, Behavior)] = &[
    ("/403", Behavior::Forbidden),
    ("/404", Behavior::NotFound),
    ("/hang", Behavior::Hang),
    ("/503", Behavior::Unavailable),
    ("/xml", Behavior::Xml),
    ("/resetCounter", Behavior::ResetCounter),
    ("/eachThirdReturns200Others503", Behavior::EachThirdOthers503),
    ("/eachThirdReturns200OthersHang", Behavior::EachThirdOthersHang),
];

/// Resolves a URL path (without query) to its behavior. Case-sensitive.
pub fn resolve(path: &str) -> Behavior {
    ROUTES
        .iter()
        .find(|(prefix, _)| path.starts_with(prefix))
        .map(|(_, behavior)| *behavior)
        .unwrap_or(Behavior::Ok)
}
