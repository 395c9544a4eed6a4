//! # Regras de Dicas — Tabela de Decisão
//!
//! As regras são **dados**, não código procedural: cada ramo tem uma
//! lista ordenada de [`Rule`], seguida da lista transversal. O
//! [`InferenceEngine`] percorre tudo com um único `fold`.
//!
//! ## Tipos de Regra
//!
//! ```text
//! When { tip, cond }  → emite `tip` se cond(respostas)
//! Always(tip)         → emite sempre que a lista é avaliada
//! FirstOf([..])       → emite só a primeira regra interna que dispara (if / else if)
//! ```
//!
//! ## Tabela Completa
//!
//! | Ramo | Regra | Condição |
//! |------|-------|----------|
//! | no_gira | LowBattery | luces=tenues ∨ tablero=tenue ∨ edad_bateria=mayor |
//! | no_gira | StarterRelay | clic_llave ∈ {clic, multi_clic} |
//! | no_gira | GroundTerminals | bornes=mal |
//! | gira | SlowStarter | vel_burro=lento |
//! | gira | FloodedMixture | olor_nafta ∈ {leve, fuerte} ∧ intentos_explosion=no |
//! | gira | SilentFuelPump | bomba_suena=no |
//! | gira | CheckLightOff | check=no_prende |
//! | gira | CheckLightStuck | check=queda_fija |
//! | arranca_se_apaga | ColdOnly / HotOnly | frio_caliente=frio / senão =caliente |
//! | arranca_se_apaga | ThrottleBody | sempre |
//! | arranca_ok | ReproduceFault | sempre |
//! | * | GasOnlyTest | combustible=gnc |
//! | * | TerminalCleaning | bornes=mal |
//! | * | FuelPumpPriming | bomba_suena=nose |
//!
//! Chave ausente (pergunta de outro ramo) faz a condição avaliar `false`.
//! As notas livres não são lidas por nenhuma regra.

use crate::core::{AnswerMap, Branch, DiagnosisError, QuestionKey};

use super::{Tip, TipList};

/// Chaves que toda entrevista completa contém, qualquer que seja o ramo.
pub const REQUIRED_KEYS: [QuestionKey; 5] = [
    QuestionKey::ArranqueEstado,
    QuestionKey::BombaSuena,
    QuestionKey::Check,
    QuestionKey::Combustible,
    QuestionKey::Bornes,
];

/// Dica emitida quando nenhuma outra regra disparou.
pub const FALLBACK: Tip = Tip::NoStrongLead;

/// Regra declarativa condição → dica.
#[derive(Clone, Copy, Debug)]
pub enum Rule {
    When {
        tip: Tip,
        cond: fn(&AnswerMap) -> bool,
    },
    Always(Tip),
    /// Grupo mutuamente exclusivo: só a primeira regra que dispara conta.
    FirstOf(&'static [Rule]),
}

impl Rule {
    /// Avalia a regra; toda regra emite no máximo uma dica.
    pub fn fire(&self, answers: &AnswerMap) -> Option<Tip> {
        match self {
            Rule::When { tip, cond } => cond(answers).then_some(*tip),
            Rule::Always(tip) => Some(*tip),
            Rule::FirstOf(rules) => rules.iter().find_map(|r| r.fire(answers)),
        }
    }
}

// ─── Condições ───────────────────────────────────────────────────

fn low_power(a: &AnswerMap) -> bool {
    a.is(QuestionKey::Luces, "tenues")
        || a.is(QuestionKey::Tablero, "tenue")
        || a.is(QuestionKey::EdadBateria, "mayor")
}

fn starter_click(a: &AnswerMap) -> bool {
    a.is_any(QuestionKey::ClicLlave, &["clic", "multi_clic"])
}

fn bad_terminals(a: &AnswerMap) -> bool {
    a.is(QuestionKey::Bornes, "mal")
}

fn slow_starter(a: &AnswerMap) -> bool {
    a.is(QuestionKey::VelBurro, "lento")
}

fn flooded(a: &AnswerMap) -> bool {
    a.is_any(QuestionKey::OlorNafta, &["leve", "fuerte"])
        && a.is(QuestionKey::IntentosExplosion, "no")
}

fn pump_silent(a: &AnswerMap) -> bool {
    a.is(QuestionKey::BombaSuena, "no")
}

fn check_never_lights(a: &AnswerMap) -> bool {
    a.is(QuestionKey::Check, "no_prende")
}

fn check_stays_on(a: &AnswerMap) -> bool {
    a.is(QuestionKey::Check, "queda_fija")
}

fn only_cold(a: &AnswerMap) -> bool {
    a.is(QuestionKey::FrioCaliente, "frio")
}

fn only_hot(a: &AnswerMap) -> bool {
    a.is(QuestionKey::FrioCaliente, "caliente")
}

fn runs_on_gas(a: &AnswerMap) -> bool {
    a.is(QuestionKey::Combustible, "gnc")
}

fn pump_unknown(a: &AnswerMap) -> bool {
    a.is(QuestionKey::BombaSuena, "nose")
}

// ─── Catálogo de regras ──────────────────────────────────────────

static NO_GIRA: &[Rule] = &[
    Rule::When { tip: Tip::LowBattery, cond: low_power },
    Rule::When { tip: Tip::StarterRelay, cond: starter_click },
    Rule::When { tip: Tip::GroundTerminals, cond: bad_terminals },
];

static GIRA: &[Rule] = &[
    Rule::When { tip: Tip::SlowStarter, cond: slow_starter },
    Rule::When { tip: Tip::FloodedMixture, cond: flooded },
    Rule::When { tip: Tip::SilentFuelPump, cond: pump_silent },
    Rule::When { tip: Tip::CheckLightOff, cond: check_never_lights },
    Rule::When { tip: Tip::CheckLightStuck, cond: check_stays_on },
];

const COLD_OR_HOT: &[Rule] = &[
    Rule::When { tip: Tip::ColdOnly, cond: only_cold },
    Rule::When { tip: Tip::HotOnly, cond: only_hot },
];

static ARRANCA_SE_APAGA: &[Rule] = &[
    Rule::FirstOf(COLD_OR_HOT),
    Rule::Always(Tip::ThrottleBody),
];

static ARRANCA_OK: &[Rule] = &[Rule::Always(Tip::ReproduceFault)];

/// Regras avaliadas depois do ramo, qualquer que seja ele.
pub static CROSS_CUTTING: &[Rule] = &[
    Rule::When { tip: Tip::GasOnlyTest, cond: runs_on_gas },
    Rule::When { tip: Tip::TerminalCleaning, cond: bad_terminals },
    Rule::When { tip: Tip::FuelPumpPriming, cond: pump_unknown },
];

/// Regras específicas do ramo, na ordem de avaliação.
pub fn branch_rules(branch: Branch) -> &'static [Rule] {
    match branch {
        Branch::NoGira => NO_GIRA,
        Branch::Gira => GIRA,
        Branch::ArrancaSeApaga => ARRANCA_SE_APAGA,
        Branch::ArrancaOk => ARRANCA_OK,
    }
}

/// Motor de dicas — struct sem estado.
///
/// `infer` é função pura do mapa de respostas: a mesma entrada produz
/// sempre a mesma lista, na mesma ordem.
pub struct InferenceEngine;

impl InferenceEngine {
    /// Avalia o catálogo de regras contra as respostas.
    ///
    /// ```text
    /// regras do ramo → regras transversais → (vazio? fallback)
    /// ```
    ///
    /// # Erros
    ///
    /// - `MissingRequiredAnswer` se faltar uma das [`REQUIRED_KEYS`]
    /// - `InvalidAnswerKind` se `arranque_estado` não for um ramo conhecido
    pub fn infer(answers: &AnswerMap) -> Result<TipList, DiagnosisError> {
        if let Some(key) = REQUIRED_KEYS.into_iter().find(|k| !answers.contains(*k)) {
            return Err(DiagnosisError::MissingRequiredAnswer { key });
        }
        let branch = answers
            .get(QuestionKey::ArranqueEstado)
            .map(Branch::parse)
            .ok_or(DiagnosisError::MissingRequiredAnswer {
                key: QuestionKey::ArranqueEstado,
            })??;

        let mut tips = branch_rules(branch)
            .iter()
            .chain(CROSS_CUTTING)
            .fold(TipList::new(), |mut tips, rule| {
                tips.extend(rule.fire(answers));
                tips
            });

        if tips.is_empty() {
            tips.push(FALLBACK);
        }

        tracing::debug!(branch = branch.as_value(), tips = tips.len(), "Dicas inferidas");
        Ok(tips)
    }
}
