//! # Catálogo de Perguntas — A Árvore da Entrevista
//!
//! O [`CATALOG`] lista **todas** as perguntas na ordem fixa de travessia.
//! Cada pergunta carrega uma [`Condition`] que decide se ela é feita,
//! avaliada contra as respostas já registradas.
//!
//! ## Ordem de Travessia
//!
//! ```text
//! arranque_estado ──┬── gira ─────────────→ vel_burro, intentos_explosion, olor_nafta
//!                   ├── no_gira ──────────→ tablero, clic_llave, luces
//!                   ├── arranca_se_apaga ─→ frio_caliente
//!                   └── arranca_ok ───────→ (nada)
//!                                │
//!                                ▼
//! bomba_suena → check → combustible → edad_bateria → bornes → notas
//! ```
//!
//! Os textos são exibidos exatamente como estão aqui, incluindo o
//! marcador `**negrito**` (ver [`crate::markup`]).

use std::fmt;
use std::str::FromStr;

use super::{AnswerMap, DiagnosisError};

/// Identificador estável de uma pergunta.
///
/// A forma textual (`as_str`) é a chave usada no [`AnswerMap`], na API
/// JSON e na tabela de resultado — nunca o texto exibido ao usuário.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QuestionKey {
    ArranqueEstado,
    VelBurro,
    IntentosExplosion,
    OlorNafta,
    Tablero,
    ClicLlave,
    Luces,
    FrioCaliente,
    BombaSuena,
    Check,
    Combustible,
    EdadBateria,
    Bornes,
    Notas,
}

impl QuestionKey {
    /// Todas as chaves, na ordem do catálogo.
    pub const ALL: [QuestionKey; 14] = [
        QuestionKey::ArranqueEstado,
        QuestionKey::VelBurro,
        QuestionKey::IntentosExplosion,
        QuestionKey::OlorNafta,
        QuestionKey::Tablero,
        QuestionKey::ClicLlave,
        QuestionKey::Luces,
        QuestionKey::FrioCaliente,
        QuestionKey::BombaSuena,
        QuestionKey::Check,
        QuestionKey::Combustible,
        QuestionKey::EdadBateria,
        QuestionKey::Bornes,
        QuestionKey::Notas,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKey::ArranqueEstado => "arranque_estado",
            QuestionKey::VelBurro => "vel_burro",
            QuestionKey::IntentosExplosion => "intentos_explosion",
            QuestionKey::OlorNafta => "olor_nafta",
            QuestionKey::Tablero => "tablero",
            QuestionKey::ClicLlave => "clic_llave",
            QuestionKey::Luces => "luces",
            QuestionKey::FrioCaliente => "frio_caliente",
            QuestionKey::BombaSuena => "bomba_suena",
            QuestionKey::Check => "check",
            QuestionKey::Combustible => "combustible",
            QuestionKey::EdadBateria => "edad_bateria",
            QuestionKey::Bornes => "bornes",
            QuestionKey::Notas => "notas",
        }
    }
}

impl fmt::Display for QuestionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionKey {
    type Err = DiagnosisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QuestionKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| DiagnosisError::UnknownQuestion { key: s.to_string() })
    }
}

/// Ramo principal da entrevista — o valor de `arranque_estado`.
///
/// Todo despacho por ramo (perguntas condicionais e regras de dicas) é
/// feito com `match` sobre este enum, então um ramo novo não compila
/// até ser tratado em todos os lugares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Branch {
    /// "No gira nada" — o motor de arranque não gira.
    NoGira,
    /// "Gira el burro" — gira mas não pega.
    Gira,
    /// "Arranca pero se apaga".
    ArrancaSeApaga,
    /// "Arranca y queda" — no momento, sem falha.
    ArrancaOk,
}

impl Branch {
    pub const ALL: [Branch; 4] = [
        Branch::NoGira,
        Branch::Gira,
        Branch::ArrancaSeApaga,
        Branch::ArrancaOk,
    ];

    pub fn as_value(&self) -> &'static str {
        match self {
            Branch::NoGira => "no_gira",
            Branch::Gira => "gira",
            Branch::ArrancaSeApaga => "arranca_se_apaga",
            Branch::ArrancaOk => "arranca_ok",
        }
    }

    /// Converte o valor de `arranque_estado` no ramo correspondente.
    ///
    /// # Erros
    ///
    /// `InvalidAnswerKind` se o valor não for um dos quatro declarados.
    pub fn parse(value: &str) -> Result<Self, DiagnosisError> {
        Branch::ALL
            .into_iter()
            .find(|branch| branch.as_value() == value)
            .ok_or_else(|| DiagnosisError::InvalidAnswerKind {
                key: QuestionKey::ArranqueEstado,
                value: value.to_string(),
            })
    }
}

/// Opção de uma pergunta de múltipla escolha: (label exibido, valor estável).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Choice {
    pub label: &'static str,
    pub value: &'static str,
}

#[derive(Clone, Copy, Debug)]
pub enum QuestionKind {
    /// Múltipla escolha — a resposta deve ser um dos `value`.
    Choice(&'static [Choice]),
    /// Texto livre. Se `optional`, a resposta vazia é aceita.
    Text {
        optional: bool,
        placeholder: &'static str,
    },
}

/// Predicado que decide se a pergunta é feita, dado o que já foi respondido.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Condition {
    Always,
    BranchIs(Branch),
}

impl Condition {
    pub fn holds(&self, answers: &AnswerMap) -> bool {
        match self {
            Condition::Always => true,
            Condition::BranchIs(branch) => answers.branch() == Some(*branch),
        }
    }
}

/// Definição de uma pergunta do catálogo.
#[derive(Clone, Copy, Debug)]
pub struct Question {
    pub key: QuestionKey,
    pub prompt: &'static str,
    pub kind: QuestionKind,
    pub asked_when: Condition,
}

impl Question {
    /// Opções da pergunta (vazio para texto livre).
    pub fn choices(&self) -> &'static [Choice] {
        match self.kind {
            QuestionKind::Choice(choices) => choices,
            QuestionKind::Text { .. } => &[],
        }
    }

    pub fn is_asked(&self, answers: &AnswerMap) -> bool {
        self.asked_when.holds(answers)
    }

    /// Verifica se `value` é uma resposta aceitável para esta pergunta.
    ///
    /// Perguntas de escolha exigem um dos valores declarados; texto livre
    /// aceita qualquer coisa, exceto vazio quando não é opcional.
    pub fn check_answer(&self, value: &str) -> Result<(), DiagnosisError> {
        let accepted = match self.kind {
            QuestionKind::Choice(choices) => choices.iter().any(|c| c.value == value),
            QuestionKind::Text { optional, .. } => optional || !value.trim().is_empty(),
        };
        if accepted {
            Ok(())
        } else {
            Err(DiagnosisError::InvalidAnswerKind {
                key: self.key,
                value: value.to_string(),
            })
        }
    }

    /// Label exibido para um valor de resposta, se for uma opção declarada.
    pub fn label_for(&self, value: &str) -> Option<&'static str> {
        self.choices()
            .iter()
            .find(|c| c.value == value)
            .map(|c| c.label)
    }
}

/// Busca a definição da pergunta com a chave dada.
pub fn find(key: QuestionKey) -> Option<&'static Question> {
    CATALOG.iter().find(|q| q.key == key)
}

// ─── Catálogo ────────────────────────────────────────────────────

/// Todas as perguntas, na ordem fixa de travessia.
pub static CATALOG: &[Question] = &[
    // Panorama inicial
    Question {
        key: QuestionKey::ArranqueEstado,
        prompt: "¿Qué hace al intentar **arrancar**?",
        kind: QuestionKind::Choice(&[
            Choice { label: "No gira nada", value: "no_gira" },
            Choice { label: "Gira el burro", value: "gira" },
            Choice { label: "Arranca pero se apaga", value: "arranca_se_apaga" },
            Choice { label: "Arranca y queda", value: "arranca_ok" },
        ]),
        asked_when: Condition::Always,
    },
    // Ramo: gira
    Question {
        key: QuestionKey::VelBurro,
        prompt: "Sensación del **burro de arranque**:",
        kind: QuestionKind::Choice(&[
            Choice { label: "Gira normal", value: "normal" },
            Choice { label: "Gira **lento** / pesado", value: "lento" },
            Choice { label: "Golpetea / solo **clic**", value: "clic" },
        ]),
        asked_when: Condition::BranchIs(Branch::Gira),
    },
    Question {
        key: QuestionKey::IntentosExplosion,
        prompt: "¿Hace **intentos de explosión**?",
        kind: QuestionKind::Choice(&[
            Choice { label: "No intenta", value: "no" },
            Choice { label: "Sí, amaga a arrancar", value: "si" },
        ]),
        asked_when: Condition::BranchIs(Branch::Gira),
    },
    Question {
        key: QuestionKey::OlorNafta,
        prompt: "Olor a **nafta** después de insistir:",
        kind: QuestionKind::Choice(&[
            Choice { label: "Nada", value: "nada" },
            Choice { label: "Leve", value: "leve" },
            Choice { label: "Fuerte (se enchastró)", value: "fuerte" },
        ]),
        asked_when: Condition::BranchIs(Branch::Gira),
    },
    // Ramo: no_gira
    Question {
        key: QuestionKey::Tablero,
        prompt: "Estado del **tablero** al dar contacto:",
        kind: QuestionKind::Choice(&[
            Choice { label: "Normal", value: "normal" },
            Choice { label: "Muy tenue / baja tensión", value: "tenue" },
            Choice { label: "Parpadea / raro", value: "raro" },
        ]),
        asked_when: Condition::BranchIs(Branch::NoGira),
    },
    Question {
        key: QuestionKey::ClicLlave,
        prompt: "Al dar a **arranque**, se escucha:",
        kind: QuestionKind::Choice(&[
            Choice { label: "Nada", value: "nada" },
            Choice { label: "Un **clic**", value: "clic" },
            Choice { label: "Varios clics seguidos", value: "multi_clic" },
        ]),
        asked_when: Condition::BranchIs(Branch::NoGira),
    },
    Question {
        key: QuestionKey::Luces,
        prompt: "**Luces bajas** con contacto:",
        kind: QuestionKind::Choice(&[
            Choice { label: "Normales", value: "normales" },
            Choice { label: "Muy **tenues**", value: "tenues" },
        ]),
        asked_when: Condition::BranchIs(Branch::NoGira),
    },
    // Ramo: arranca_se_apaga
    Question {
        key: QuestionKey::FrioCaliente,
        prompt: "¿Pasa **en frío**, **en caliente** o siempre?",
        kind: QuestionKind::Choice(&[
            Choice { label: "Solo en frío", value: "frio" },
            Choice { label: "Solo caliente", value: "caliente" },
            Choice { label: "Siempre", value: "siempre" },
        ]),
        asked_when: Condition::BranchIs(Branch::ArrancaSeApaga),
    },
    // Alimentação / ECU / painel
    Question {
        key: QuestionKey::BombaSuena,
        prompt: "Al dar contacto, la **bomba de nafta** suena 2–3 s:",
        kind: QuestionKind::Choice(&[
            Choice { label: "Sí", value: "si" },
            Choice { label: "No", value: "no" },
            Choice { label: "No sé / no se escucha", value: "nose" },
        ]),
        asked_when: Condition::Always,
    },
    Question {
        key: QuestionKey::Check,
        prompt: "Luz de **CHECK ENGINE**:",
        kind: QuestionKind::Choice(&[
            Choice { label: "Enciende y se apaga", value: "ok" },
            Choice { label: "No enciende nunca", value: "no_prende" },
            Choice { label: "Queda encendida fija", value: "queda_fija" },
        ]),
        asked_when: Condition::Always,
    },
    Question {
        key: QuestionKey::Combustible,
        prompt: "Combustible habitual:",
        kind: QuestionKind::Choice(&[
            Choice { label: "Nafta", value: "nafta" },
            Choice { label: "Nafta + **GNC**", value: "gnc" },
            Choice { label: "Diésel", value: "diesel" },
        ]),
        asked_when: Condition::Always,
    },
    // Bateria / cabos
    Question {
        key: QuestionKey::EdadBateria,
        prompt: "Edad de la **batería**:",
        kind: QuestionKind::Choice(&[
            Choice { label: "< 1 año", value: "menor" },
            Choice { label: "1–3 años", value: "media" },
            Choice { label: "> 3 años / ni idea", value: "mayor" },
        ]),
        asked_when: Condition::Always,
    },
    Question {
        key: QuestionKey::Bornes,
        prompt: "Estado de **bornes** y **cables de masa**:",
        kind: QuestionKind::Choice(&[
            Choice { label: "Limpios y firmes", value: "ok" },
            Choice { label: "**Sulfatados** / flojos", value: "mal" },
            Choice { label: "No revisado", value: "nose" },
        ]),
        asked_when: Condition::Always,
    },
    // Notas livres — nunca lidas pelas regras
    Question {
        key: QuestionKey::Notas,
        prompt: "Notas rápidas (opcional)",
        kind: QuestionKind::Text {
            optional: true,
            placeholder: "Lluvia, frío, trabajos previos, puente de batería, etc.",
        },
        asked_when: Condition::Always,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_follows_key_order() {
        let keys: Vec<QuestionKey> = CATALOG.iter().map(|q| q.key).collect();
        assert_eq!(keys, QuestionKey::ALL.to_vec());
    }

    #[test]
    fn key_round_trips_through_str() {
        for key in QuestionKey::ALL {
            assert_eq!(key.as_str().parse::<QuestionKey>().unwrap(), key);
        }
        assert!(matches!(
            "patente".parse::<QuestionKey>(),
            Err(DiagnosisError::UnknownQuestion { .. })
        ));
    }

    #[test]
    fn branch_values_match_first_question_choices() {
        let first = &CATALOG[0];
        let values: Vec<&str> = first.choices().iter().map(|c| c.value).collect();
        let branches: Vec<&str> = Branch::ALL.iter().map(|b| b.as_value()).collect();
        assert_eq!(values, branches);
    }

    #[test]
    fn unknown_branch_is_invalid_answer() {
        let err = Branch::parse("vuela").unwrap_err();
        assert!(matches!(
            err,
            DiagnosisError::InvalidAnswerKind { key: QuestionKey::ArranqueEstado, .. }
        ));
    }

    #[test]
    fn check_answer_rejects_undeclared_value() {
        let q = find(QuestionKey::Bornes).unwrap();
        assert!(q.check_answer("mal").is_ok());
        assert!(q.check_answer("oxidado").is_err());
        assert_eq!(q.label_for("ok"), Some("Limpios y firmes"));
    }

    #[test]
    fn optional_text_accepts_empty() {
        let notas = find(QuestionKey::Notas).unwrap();
        assert!(notas.check_answer("").is_ok());
        assert!(notas.choices().is_empty());
    }
}
