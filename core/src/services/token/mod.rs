//! Access-token signing and verification

mod codec;


pub use codec::{TokenCodec, ACCESS_TOKEN_ALGORITHM};
