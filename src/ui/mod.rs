pub mod result_list;
pub mod search_select;
pub mod theme;
