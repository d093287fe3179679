//! Keyword classification of free-text stage and event labels.
//!
//! Labels are normalized (accents stripped, upper-cased, whitespace
//! collapsed) and matched against an ordered [`RuleTable`]: the first rule
//! with any keyword contained in the label decides the role. Rule order is
//! significant and pinned by tests.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Role of a maintenance stage label in arrival/departure pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageRole {
    /// The vehicle reached the shop.
    Arrival,
    /// The vehicle left the shop.
    Departure,
    /// Any other stage.
    Neither,
}

/// Operational state of a vehicle in the generic lifecycle stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LifecycleState {
    Locacao,
    Manutencao,
    Sinistro,
    Multa,
    Outro,
}

impl LifecycleState {
    pub const ALL: [Self; 5] = [
        Self::Locacao,
        Self::Manutencao,
        Self::Sinistro,
        Self::Multa,
        Self::Outro,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Locacao => "LOCACAO",
            Self::Manutencao => "MANUTENCAO",
            Self::Sinistro => "SINISTRO",
            Self::Multa => "MULTA",
            Self::Outro => "OUTRO",
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LifecycleState {
    type Err = UnknownState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownState(s.to_string()))
    }
}

/// Error type for unknown lifecycle state names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownState(String);

impl fmt::Display for UnknownState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown lifecycle state: {}", self.0)
    }
}

impl std::error::Error for UnknownState {}

/// One classification rule: if any keyword occurs in the label, `role` wins.
#[derive(Debug, Clone, Copy)]
pub struct Rule<R: 'static> {
    pub keywords: &'static [&'static str],
    pub role: R,
}

/// Ordered rules evaluated top to bottom, with a fallback role.
#[derive(Debug, Clone, Copy)]
pub struct RuleTable<R: 'static> {
    pub rules: &'static [Rule<R>],
    pub default: R,
}

impl<R: Copy> RuleTable<R> {
    /// Classifies a raw label.
    pub fn classify(&self, label: &str) -> R {
        self.classify_normalized(&normalize_label(label))
    }

    /// Classifies a label already passed through [`normalize_label`].
    pub fn classify_normalized(&self, normalized: &str) -> R {
        self.matching_rule(normalized)
            .map_or(self.default, |idx| self.rules[idx].role)
    }

    /// Index of the first rule matching a normalized label.
    pub fn matching_rule(&self, normalized: &str) -> Option<usize> {
        self.rules
            .iter()
            .position(|rule| rule.keywords.iter().any(|kw| normalized.contains(kw)))
    }
}

/// Maintenance stage rules. Arrival is checked before departure.
pub const MAINTENANCE_STAGES: RuleTable<StageRole> = RuleTable {
    rules: &[
        Rule {
            keywords: &["AGUARDANDO CHEGADA", "CHEG", "ENTR", "RECEB"],
            role: StageRole::Arrival,
        },
        Rule {
            keywords: &[
                "AGUARDANDO RETIRADA DO VEICULO",
                "AGUARDANDO RETIRADA",
                "RETIR",
                "SAIDA",
                "CONCLUI",
                "LIBERAD",
            ],
            role: StageRole::Departure,
        },
    ],
    default: StageRole::Neither,
};

/// Lifecycle event rules.
pub const LIFECYCLE_EVENTS: RuleTable<LifecycleState> = RuleTable {
    rules: &[
        Rule {
            keywords: &["LOCACAO", "LOCA", "ALUGUEL", "RETIRADA"],
            role: LifecycleState::Locacao,
        },
        Rule {
            keywords: &["MANUTENCAO", "MANUT", "OFICINA", "REPARO", "SERVICO"],
            role: LifecycleState::Manutencao,
        },
        Rule {
            keywords: &["SINISTRO", "ACIDENTE", "COLISAO", "BATIDA"],
            role: LifecycleState::Sinistro,
        },
        Rule {
            keywords: &["MULTA", "INFRACAO", "AIT"],
            role: LifecycleState::Multa,
        },
    ],
    default: LifecycleState::Outro,
};

/// Strips accents, upper-cases, trims and collapses inner whitespace.
pub fn normalize_label(label: &str) -> String {
    let stripped: String = label.nfd().filter(|c| !is_combining_mark(*c)).collect();
    stripped
        .to_uppercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_accents_and_case() {
        assert_eq!(
            normalize_label("  Aguardando Retirada do Veículo "),
            "AGUARDANDO RETIRADA DO VEICULO"
        );
        assert_eq!(normalize_label("Manutenção"), "MANUTENCAO");
        assert_eq!(normalize_label("Colisão\t leve"), "COLISAO LEVE");
        assert_eq!(normalize_label("Saída"), "SAIDA");
    }

    #[test]
    fn maintenance_keywords_by_group() {
        let cases = [
            ("Aguardando Chegada", StageRole::Arrival),
            ("Chegou na oficina", StageRole::Arrival),
            ("Entrada", StageRole::Arrival),
            ("Recebido pelo fornecedor", StageRole::Arrival),
            ("Aguardando Retirada do Veículo", StageRole::Departure),
            ("Aguardando Retirada", StageRole::Departure),
            ("Retirado", StageRole::Departure),
            ("Saída", StageRole::Departure),
            ("Serviço Concluído", StageRole::Departure),
            ("Liberado", StageRole::Departure),
            ("Em orçamento", StageRole::Neither),
            ("", StageRole::Neither),
        ];
        for (label, expected) in cases {
            assert_eq!(MAINTENANCE_STAGES.classify(label), expected, "label {label:?}");
        }
    }

    #[test]
    fn arrival_rule_outranks_departure_rule() {
        // Both an arrival keyword (CHEG / ENTR / RECEB) and a departure
        // keyword (RETIR / LIBERAD / CONCLUI) are present.
        let cases = [
            "Chegada para retirada",
            "Veículo liberado, aguardando entrega",
            "Recebimento concluído",
        ];
        for label in cases {
            assert_eq!(
                MAINTENANCE_STAGES.classify(label),
                StageRole::Arrival,
                "label {label:?}"
            );
        }
    }

    #[test]
    fn lifecycle_keywords_by_group() {
        let cases = [
            ("Locação", LifecycleState::Locacao),
            ("Início de locacao", LifecycleState::Locacao),
            ("Aluguel mensal", LifecycleState::Locacao),
            ("Retirada", LifecycleState::Locacao),
            ("Manutenção preventiva", LifecycleState::Manutencao),
            ("Manut. corretiva", LifecycleState::Manutencao),
            ("Entrada na oficina", LifecycleState::Manutencao),
            ("Reparo de funilaria", LifecycleState::Manutencao),
            ("Serviço", LifecycleState::Manutencao),
            ("Sinistro", LifecycleState::Sinistro),
            ("Acidente", LifecycleState::Sinistro),
            ("Colisão traseira", LifecycleState::Sinistro),
            ("Batida", LifecycleState::Sinistro),
            ("Multa", LifecycleState::Multa),
            ("Infração de trânsito", LifecycleState::Multa),
            ("AIT 12345", LifecycleState::Multa),
            ("Devolução", LifecycleState::Outro),
            ("Venda", LifecycleState::Outro),
            ("Compra", LifecycleState::Outro),
        ];
        for (label, expected) in cases {
            assert_eq!(LIFECYCLE_EVENTS.classify(label), expected, "label {label:?}");
        }
    }

    #[test]
    fn lifecycle_rule_order_decides_ties() {
        assert_eq!(
            LIFECYCLE_EVENTS.classify("Retirada para oficina"),
            LifecycleState::Locacao
        );
        assert_eq!(
            LIFECYCLE_EVENTS.classify("Reparo após acidente"),
            LifecycleState::Manutencao
        );
        assert_eq!(
            LIFECYCLE_EVENTS.classify("Multa por colisão"),
            LifecycleState::Sinistro
        );
    }

    #[test]
    fn matching_rule_reports_position() {
        assert_eq!(MAINTENANCE_STAGES.matching_rule("AGUARDANDO CHEGADA"), Some(0));
        assert_eq!(MAINTENANCE_STAGES.matching_rule("LIBERADO"), Some(1));
        assert_eq!(MAINTENANCE_STAGES.matching_rule("ORCAMENTO"), None);
    }

    #[test]
    fn lifecycle_state_roundtrip() {
        for state in LifecycleState::ALL {
            let parsed: LifecycleState = state.to_string().parse().expect("should parse");
            assert_eq!(parsed, state);
        }
        assert!("FERIAS".parse::<LifecycleState>().is_err());
    }
}
