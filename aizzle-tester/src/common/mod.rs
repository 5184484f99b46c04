pub mod util;

pub use util::{parse_categories, parse_levels, parse_rolls, split_csv};
