mod options;
pub mod requests;

pub use options::{SearchOption, SortDirection, SortOption};
pub use requests::{
    encode, encode_part_detail, Filters, KeywordSearchRequest, ParametricFilter,
    PartDetailRequest, PartDetailStyle, RequestShape, Sort,
};
