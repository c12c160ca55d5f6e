pub mod category_repo;
