pub mod check_docs;
pub mod generate;
pub mod history;
pub mod init;
pub mod pre_commit;
