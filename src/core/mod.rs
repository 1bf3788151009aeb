// Core modules implementing document decoding, pagination, and error modeling.
pub mod error;
pub mod jsonapi;
pub mod links;
pub mod paginate;
pub mod timestamp;
