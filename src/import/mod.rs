mod csv_import;
mod reconcile;

pub(crate) use reconcile::import_transactions;
