pub mod album;
pub mod photo;
pub mod shared;

#[cfg(test)]
pub(crate) mod test_support;
