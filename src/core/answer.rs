//! # AnswerMap — Respostas de Uma Entrevista
//!
//! Mapa de [`QuestionKey`] → valor, **em ordem de inserção**. A ordem
//! importa: a tabela de resultado lista as respostas na sequência em que
//! foram dadas.
//!
//! ## Invariantes
//!
//! - Uma chave está presente **se e somente se** a pergunta foi feita
//! - Uma chave nunca é sobrescrita
//! - Cada entrevista tem o seu próprio mapa; nada é compartilhado entre sessões
//!
//! ## Formato JSON
//!
//! Serializa como objeto, preservando a ordem do documento:
//!
//! ```json
//! { "arranque_estado": "gira", "vel_burro": "lento", "notas": "" }
//! ```

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::question::{self, Branch, QuestionKey};
use super::DiagnosisError;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnswerMap {
    entries: Vec<(QuestionKey, String)>,
}

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Monta um mapa a partir de pares (chave, valor) validados contra o catálogo.
    ///
    /// Usado na fronteira JSON e nos testes. Não verifica consistência
    /// entre ramos: uma chave de outro ramo só faz as regras avaliarem falso.
    ///
    /// # Erros
    ///
    /// - `UnknownQuestion` — chave fora do catálogo
    /// - `InvalidAnswerKind` — valor fora das opções declaradas
    /// - `DuplicateAnswer` — mesma chave duas vezes
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, DiagnosisError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut map = AnswerMap::new();
        for (key, value) in pairs {
            let key: QuestionKey = key.as_ref().parse()?;
            let value = value.into();
            if let Some(question) = question::find(key) {
                question.check_answer(&value)?;
            }
            if !map.insert(key, value) {
                return Err(DiagnosisError::DuplicateAnswer { key });
            }
        }
        Ok(map)
    }

    /// Registra uma resposta. Retorna `false` (sem alterar nada) se a
    /// chave já existia.
    pub(crate) fn insert(&mut self, key: QuestionKey, value: String) -> bool {
        if self.contains(key) {
            return false;
        }
        self.entries.push((key, value));
        true
    }

    pub fn get(&self, key: QuestionKey) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: QuestionKey) -> bool {
        self.entries.iter().any(|(k, _)| *k == key)
    }

    /// `true` se a chave está presente **e** tem exatamente esse valor.
    /// Chave ausente nunca casa.
    pub fn is(&self, key: QuestionKey, value: &str) -> bool {
        self.get(key) == Some(value)
    }

    pub fn is_any(&self, key: QuestionKey, values: &[&str]) -> bool {
        self.get(key).is_some_and(|v| values.contains(&v))
    }

    /// Ramo escolhido, se `arranque_estado` já foi respondida com um valor válido.
    pub fn branch(&self) -> Option<Branch> {
        self.get(QuestionKey::ArranqueEstado)
            .and_then(|v| Branch::parse(v).ok())
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionKey, &str)> {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = QuestionKey> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for AnswerMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key.as_str(), value)?;
        }
        map.end()
    }
}

struct AnswerMapVisitor;

impl<'de> Visitor<'de> for AnswerMapVisitor {
    type Value = AnswerMap;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("un objeto { clave: valor } con respuestas de la entrevista")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<AnswerMap, A::Error> {
        // Coleta na ordem do documento antes de validar
        let mut pairs: Vec<(String, String)> = Vec::new();
        while let Some((key, value)) = access.next_entry::<String, String>()? {
            pairs.push((key, value));
        }
        AnswerMap::from_pairs(pairs).map_err(serde::de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for AnswerMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(AnswerMapVisitor)
    }
}
