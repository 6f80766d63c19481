#[cfg(test)]
pub mod test_fixtures;
