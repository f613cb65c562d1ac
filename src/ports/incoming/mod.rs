pub mod topic_admin;
