pub mod form_detail;
pub mod score_table;
