pub mod buffer_state;
pub mod change_data;
pub mod edit_event;
pub mod payload;
pub mod range_list;
pub mod selection;
pub mod token_range;
