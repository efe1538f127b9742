mod resource_quota_list;

pub use resource_quota_list::{ResourceQuotaList, ResourceQuotaRenderer};
