pub mod currency;
mod errors;

pub use errors::Error;

pub type MovieDataResult<T> = Result<T, Error>;
