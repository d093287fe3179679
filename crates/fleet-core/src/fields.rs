//! Ordered field-name fallback chains for each logical field.
//!
//! Source systems name the same column differently. Each chain lists the
//! accepted names in priority order; the first non-empty one wins.

use serde_json::Value;

use crate::record::RawRecord;

/// A logical field and its candidate source column names, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldChain {
    /// Logical name, used in log output.
    pub name: &'static str,
    /// Candidate column names, highest priority first.
    pub candidates: &'static [&'static str],
}

pub const CONTRACT_START: FieldChain = FieldChain {
    name: "contract_start",
    candidates: &[
        "Inicio",
        "DataInicio",
        "DataInicial",
        "InicioContrato",
        "DataRetirada",
        "DataInicioLocacao",
    ],
};

pub const CONTRACT_END: FieldChain = FieldChain {
    name: "contract_end",
    candidates: &[
        "DataEncerramento",
        "Fim",
        "DataFim",
        "DataFimEfetiva",
        "DataTermino",
        "DataFimLocacao",
    ],
};

pub const OCCURRENCE_ID: FieldChain = FieldChain {
    name: "occurrence_id",
    candidates: &[
        "Ocorrencia",
        "OcorrenciaId",
        "MovimentacaoId",
        "Id",
        "IdOcorrencia",
    ],
};

pub const STAGE_LABEL: FieldChain = FieldChain {
    name: "stage_label",
    candidates: &["etapa", "Etapa"],
};

pub const STAGE_TIMESTAMP: FieldChain = FieldChain {
    name: "stage_timestamp",
    candidates: &["DataEtapa", "Data", "DataChegada", "DataEntrada"],
};

pub const PLATE: FieldChain = FieldChain {
    name: "plate",
    candidates: &["Placa", "placa", "Plate"],
};

pub const EVENT_TYPE: FieldChain = FieldChain {
    name: "event_type",
    candidates: &["TipoEvento", "Evento", "tipo_evento", "evento"],
};

pub const EVENT_DATE: FieldChain = FieldChain {
    name: "event_date",
    candidates: &["DataEvento", "Data", "data_evento", "data"],
};

pub const PURCHASE_DATE: FieldChain = FieldChain {
    name: "purchase_date",
    candidates: &["DataCompra", "DataAquisicao"],
};

pub const SALE_DATE: FieldChain = FieldChain {
    name: "sale_date",
    candidates: &["DataVenda", "DataBaixa"],
};

/// Returns true for values that count as "not populated".
///
/// `null` and blank strings are empty; every other value, including `0` and
/// `false`, is populated.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Returns the first populated candidate of `chain` in `record`.
pub fn first_non_empty<'a>(record: &'a RawRecord, chain: &FieldChain) -> Option<&'a Value> {
    chain
        .candidates
        .iter()
        .filter_map(|name| record.get(name))
        .find(|value| !is_empty_value(value))
}

/// Renders a scalar field value as trimmed text.
///
/// Ids arrive as numbers from some sources and as strings from others.
pub fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
