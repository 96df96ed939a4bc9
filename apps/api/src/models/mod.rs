pub mod profile;

#[cfg(test)]
pub mod fixtures;
