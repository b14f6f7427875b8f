pub mod path_index;
