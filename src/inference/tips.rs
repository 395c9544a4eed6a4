//! # Dicas de Diagnóstico
//!
//! Cada [`Tip`] é um texto orientativo fixo, emitido por exatamente uma
//! regra. O [`Topic`] agrupa dicas sobre o mesmo assunto — a dica de
//! bornes do ramo `no_gira` e a dica transversal de bornes têm redação
//! diferente, mas o mesmo tópico.

use serde::Serialize;

use crate::markup;

/// Assunto de uma dica — usado para estilizar e para agrupar duplicatas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Battery,
    Starter,
    Terminals,
    Fuel,
    FuelPump,
    Ecu,
    Idle,
    Gas,
    General,
}

impl Topic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Battery => "battery",
            Topic::Starter => "starter",
            Topic::Terminals => "terminals",
            Topic::Fuel => "fuel",
            Topic::FuelPump => "fuel_pump",
            Topic::Ecu => "ecu",
            Topic::Idle => "idle",
            Topic::Gas => "gas",
            Topic::General => "general",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tip {
    // no_gira
    LowBattery,
    StarterRelay,
    GroundTerminals,
    // gira
    SlowStarter,
    FloodedMixture,
    SilentFuelPump,
    CheckLightOff,
    CheckLightStuck,
    // arranca_se_apaga
    ColdOnly,
    HotOnly,
    ThrottleBody,
    // arranca_ok
    ReproduceFault,
    // transversais
    GasOnlyTest,
    TerminalCleaning,
    FuelPumpPriming,
    /// Nenhuma outra regra disparou.
    NoStrongLead,
}

impl Tip {
    /// Texto da dica, com marcação `**negrito**`.
    pub fn text(&self) -> &'static str {
        match self {
            Tip::LowBattery => "Posible **batería baja** o mal contacto. Medir tensión en reposo y **caída en arranque**.",
            Tip::StarterRelay => "Revisar **relay/automático del burro** y señal de arranque.",
            Tip::GroundTerminals => "Limpiar **bornes** y verificar **masa** al block y carrocería.",
            Tip::SlowStarter => "**Burro lento**: revisar batería/cables/masa; medir caída de tensión al dar arranque.",
            Tip::FloodedMixture => "**Mezcla rica / encharcado**: pedal a fondo (corte de inyección) y probar. Verificar inyección.",
            Tip::SilentFuelPump => "No suena **bomba**: chequear fusible/relay/inercia y **presión** de combustible.",
            Tip::CheckLightOff => "Sin **CHECK**: revisar **relés principales**, fusibles y **12V a ECU**.",
            Tip::CheckLightStuck => "**CHECK fijo**: leer **códigos** primero; puede haber inmovilizador/claves.",
            Tip::ColdOnly => "Solo **en frío**: ECT/IAT fuera de rango, entrada de aire falsa, batería débil en frío.",
            Tip::HotOnly => "Solo **caliente**: sensor CKP intermitente, presión de nafta cayendo, vapores/EVAP.",
            Tip::ThrottleBody => "Limpiar **cuerpo de aceleración** y chequear **IAC/ISC**.",
            Tip::ReproduceFault => "Si ahora está bien, replicar condición de falla: **frío/calor/humedad** y **escaneo OBD**.",
            Tip::GasOnlyTest => "Con **GNC**, probar **solo a nafta** para descartar conmutación/instalación de gas.",
            Tip::TerminalCleaning => "**Limpieza de bornes** y apriete; medir caídas de tensión en **masa** y **positivo**.",
            Tip::FuelPumpPriming => "Confirmar si la **bomba** hace cebado 2–3 s; si no, revisar **relay** y alimentación.",
            Tip::NoStrongLead => "Sin pista fuerte. Seguir con **escáner**, lectura de **códigos**, prueba de **chispa** y **presión de combustible**, y sincronismo **CKP/CMP**.",
        }
    }

    pub fn topic(&self) -> Topic {
        match self {
            Tip::LowBattery => Topic::Battery,
            Tip::StarterRelay | Tip::SlowStarter => Topic::Starter,
            Tip::GroundTerminals | Tip::TerminalCleaning => Topic::Terminals,
            Tip::FloodedMixture => Topic::Fuel,
            Tip::SilentFuelPump | Tip::FuelPumpPriming => Topic::FuelPump,
            Tip::CheckLightOff | Tip::CheckLightStuck => Topic::Ecu,
            Tip::ColdOnly | Tip::HotOnly | Tip::ThrottleBody => Topic::Idle,
            Tip::GasOnlyTest => Topic::Gas,
            Tip::ReproduceFault | Tip::NoStrongLead => Topic::General,
        }
    }

    /// Texto sem marcação, para logs e para a API JSON.
    pub fn plain_text(&self) -> String {
        markup::plain(self.text())
    }
}
