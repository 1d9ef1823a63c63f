use serde_json::Value;

use crate::error::{ApiError, Result};
use crate::table::display::DisplayNames;
use crate::table::Table;

/// How an endpoint's payload becomes rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableShape {
    /// nested object to start from
    pub section: Option<&'static str>,
    /// array holding the rows; the payload itself when absent
    pub main_list: Option<&'static str>,
    /// fields of the enclosing object copied onto every row
    pub insertables: &'static [&'static str],
    /// list-valued columns expanded to one row per element
    pub explode: &'static [&'static str],
    /// wire name -> display label, used only when display names are on
    pub display_names: DisplayNames,
}

impl TableShape {
    pub const PLAIN: TableShape = TableShape {
        section: None,
        main_list: None,
        insertables: &[],
        explode: &[],
        display_names: &[],
    };

    pub const fn rows(main_list: &'static str) -> Self {
        TableShape {
            section: None,
            main_list: Some(main_list),
            insertables: &[],
            explode: &[],
            display_names: &[],
        }
    }

    pub const fn section(mut self, section: &'static str) -> Self {
        self.section = Some(section);
        self
    }

    pub const fn insert(mut self, insertables: &'static [&'static str]) -> Self {
        self.insertables = insertables;
        self
    }

    pub const fn explode(mut self, explode: &'static [&'static str]) -> Self {
        self.explode = explode;
        self
    }

    pub const fn display(mut self, display_names: DisplayNames) -> Self {
        self.display_names = display_names;
        self
    }

    /// Swaps wire names for display labels.
    pub fn relabel(&self, table: &mut Table) {
        for (wire, label) in self.display_names {
            table.rename_column(wire, label);
        }
    }

    pub fn apply(&self, payload: &Value) -> Result<Table> {
        let base = match self.section {
            Some(section) => payload.get(section).ok_or_else(|| {
                ApiError::InvalidResponse(format!("response has no '{section}' object"))
            })?,
            None => payload,
        };

        let mut table = match self.main_list {
            Some(list) => match base.get(list) {
                None | Some(Value::Null) => Table::new(),
                Some(items @ Value::Array(_)) => Table::from_json(items)?,
                Some(other) => {
                    return Err(ApiError::InvalidResponse(format!(
                        "'{list}' should be a list, got {other}"
                    )))
                }
            },
            None => Table::from_json(base)?,
        };

        for field in self.insertables {
            let value = base.get(*field).cloned().unwrap_or(Value::Null);
            table.insert_column(field, value);
        }
        for column in self.explode {
            table.explode(column);
        }

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const STATEMENT: TableShape = TableShape::rows("transactions")
        .insert(&["governmentProgramCode", "governmentProgramName"])
        .explode(&["expensesDocuments"]);

    #[test]
    fn rows_from_main_list_with_inserted_header() {
        let payload = json!({
            "governmentProgramCode": 10,
            "governmentProgramName": "PNAE",
            "transactions": [
                {"id": 1, "value": 5.0, "expensesDocuments": [100, 101]},
                {"id": 2, "value": 7.0, "expensesDocuments": []},
            ]
        });
        let table = STATEMENT.apply(&payload).unwrap();

        assert_eq!(
            table.columns(),
            ["id", "value", "expensesDocuments", "governmentProgramCode", "governmentProgramName"]
        );
        assert_eq!(table.len(), 3);
        assert_eq!(
            table.column("expensesDocuments").unwrap(),
            vec![&json!(100), &json!(101), &Value::Null]
        );
        assert_eq!(table.column("governmentProgramName").unwrap(), vec![&json!("PNAE"); 3]);
    }

    #[test]
    fn empty_main_list_keeps_derivable_columns() {
        let payload = json!({"governmentProgramCode": 10, "transactions": []});
        let table = STATEMENT.apply(&payload).unwrap();

        assert!(table.is_empty());
        assert_eq!(table.columns(), ["governmentProgramCode", "governmentProgramName"]);
    }

    #[test]
    fn missing_main_list_is_empty() {
        let table = TableShape::rows("categorias").apply(&json!({})).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn section_is_entered_first() {
        let shape = TableShape::rows("items").section("expenseDocument").insert(&["accessKey"]);
        let payload = json!({
            "issuer": {"legalName": "ACME"},
            "expenseDocument": {"accessKey": "K1", "items": [{"code": "A"}, {"code": "B"}]}
        });
        let table = shape.apply(&payload).unwrap();
        assert_eq!(table.columns(), ["code", "accessKey"]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn missing_section_or_non_list_is_invalid() {
        let shape = TableShape::rows("items").section("expenseDocument");
        assert!(matches!(shape.apply(&json!({})), Err(ApiError::InvalidResponse(_))));
        assert!(matches!(
            TableShape::rows("items").apply(&json!({"items": "nope"})),
            Err(ApiError::InvalidResponse(_))
        ));
    }

    #[test]
    fn relabel_swaps_only_listed_columns() {
        let shape = TableShape::rows("categorias").display(&[("codigo", "Código Categoria")]);
        let mut table = shape
            .apply(&json!({"categorias": [{"codigo": 3, "indicadorDespesaAtiva": "S"}]}))
            .unwrap();
        assert_eq!(table.columns(), ["codigo", "indicadorDespesaAtiva"]);

        shape.relabel(&mut table);
        assert_eq!(table.columns(), ["Código Categoria", "indicadorDespesaAtiva"]);
    }

    #[test]
    fn plain_shape_takes_payload_as_is() {
        let table = TableShape::PLAIN.apply(&json!({"timestampInclusaoCategoriaDespesa": "x"})).unwrap();
        assert_eq!(table.len(), 1);
    }
}
