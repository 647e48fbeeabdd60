/// Number of records requested per page from the record service.
pub const BATCH_SIZE: usize = 1000;

/// Host of the Cellbase instance serving ClinVar documents.
pub const DEFAULT_CELLBASE_HOST: &str = "www.ebi.ac.uk";

/// Path of the paginated ClinVar endpoint, relative to the host.
pub const CELLBASE_CLINVAR_PATH: &str = "/cellbase/webservices/rest/v3/hsapiens/feature/clinical/all";

// Column names of the ClinVar variant summary table

pub const RS_COLUMN: &str = "RS# (dbSNP)";
pub const NSV_COLUMN: &str = "nsv/esv (dbVar)";
pub const RCV_COLUMN: &str = "RCVaccession";
