mod csv_export;
mod csv_import;

pub(crate) use csv_export::export_csv;
pub(crate) use csv_import::import_csv;
