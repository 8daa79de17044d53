/// Field values written to a location row
///
/// The coordinator decides the final `manager_id` before handing these to the
/// store; stores never interpret ownership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationFields {
    pub name: String,
    pub address: String,
    pub table_count: i32,
    pub manager_id: Option<i32>,
}
