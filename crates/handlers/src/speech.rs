//! Fixed phrases and intent names of the skill.

pub const GREETING: &str = "Hola soy R2 D2, pregunta lo que quieras";
pub const HELP: &str = "Soy un robot de starwars muy conocido, pregunta lo que quieras";
pub const FAREWELL: &str = "Adios!";
pub const FALLBACK: &str = "Sorry, I don't know about that. Please try again.";
pub const APOLOGY: &str = "Lo siento no te entendi, vuelve a preguntar.";
pub const FOLLOW_UP: &str = "Quieres algo mas?";

/// Reflected intents are spoken as `"{REFLECT_PREFIX} {intent}"`.
pub const REFLECT_PREFIX: &str = "Enviaste esto";

pub mod intents {
    pub const PLAY_AUDIO: &str = "PlayAudioIntent";
    pub const RESUME: &str = "AMAZON.ResumeIntent";
    pub const HELP: &str = "AMAZON.HelpIntent";
    pub const CANCEL: &str = "AMAZON.CancelIntent";
    pub const STOP: &str = "AMAZON.StopIntent";
    pub const FALLBACK: &str = "AMAZON.FallbackIntent";
}
