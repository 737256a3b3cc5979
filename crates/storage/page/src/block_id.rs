/// Identifier of a block within a heap file. Block numbering starts at 1;
/// 0 is never a valid block.
pub type BlockID = u32;

/// Identifier of a record within a slotted page. Record numbering starts at
/// 1; id 0 is reserved for the page header. Identifiers are never reused
/// within a page, even after the record is deleted.
pub type RecordID = u16;
