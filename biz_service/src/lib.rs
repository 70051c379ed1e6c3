pub mod biz_service;
pub mod entitys;
pub mod store;

#[cfg(test)]
mod test_util;
