/// Identity bundle a caller attaches to requests for peer-side authorization.
///
/// Owned by the caller and borrowed by any number of request builders; this
/// crate never mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecurityPolicy {
    /// Acting identity; may be empty.
    pub user: String,
    /// Attribute strings, in order. `None` means the caller set nothing; the
    /// wire always ends up carrying at least an empty list.
    pub attributes: Option<Vec<String>>,
    /// Opaque payload forwarded to the chaincode.
    pub metadata: Vec<u8>,
    /// Alternate request-ID generation algorithm; empty selects the default.
    pub custom_id_gen_alg: String,
}
