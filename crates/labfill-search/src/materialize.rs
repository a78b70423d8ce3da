//! Extracting target field values from a single matched row.

use tracing::{error, warn};

use labfill_ingest::{ColumnAccess, ResultTable};
use labfill_model::{CellValue, TargetColumnList};

use crate::error::SearchError;
use crate::operator::{Notice, Operator};
use crate::outcome::{ResolvedField, ResolvedRecord};

/// Reads every eligible target column from the first row of `row`.
///
/// A missing column degrades that field to zero, is reported as a warning,
/// and extraction carries on. Any other table error aborts the extraction
/// and nothing is returned, so no partial set of fields is ever applied.
pub fn materialize_fields(
    row: &ResultTable,
    targets: &TargetColumnList,
    operator: &mut dyn Operator,
) -> Result<ResolvedRecord, SearchError> {
    let mut fields = Vec::with_capacity(targets.eligible_len());
    for target in targets.eligible() {
        let Some(column) = target.source_column() else {
            continue;
        };
        match row.cell(column, 0) {
            Ok(ColumnAccess::Found(value)) => fields.push(ResolvedField {
                field: target.field.clone(),
                column: column.to_string(),
                value,
                missing: false,
            }),
            Ok(ColumnAccess::Missing(name)) => {
                let err = SearchError::MissingColumn { column: name };
                warn!(column = %column, field = %target.field, "column missing, field left empty");
                operator.notify(&Notice::warning(err.to_string()));
                fields.push(ResolvedField {
                    field: target.field.clone(),
                    column: column.to_string(),
                    value: CellValue::ZERO,
                    missing: true,
                });
            }
            Err(err) => {
                let err = SearchError::from(err);
                error!(column = %column, error = %err, "field extraction aborted");
                operator.notify(&Notice::error(err.to_string()));
                return Err(err);
            }
        }
    }
    Ok(ResolvedRecord { fields })
}
