// SQL builders for dynamic searches

pub mod member_query;
