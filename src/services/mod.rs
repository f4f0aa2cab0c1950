// Services Layer
// イントロスペクション、型解決、コード合成を束ねるサービス層

pub mod binding_generator;
pub mod code_synthesizer;
pub mod config_loader;
pub mod database_config_resolver;
pub mod function_introspector;
pub mod type_resolver;
