pub mod config_load;
pub mod config_types;

pub use config_load::Config;
pub use config_types::{
    AnimationConfig, ConnectionConfig, FlowConfig, LabelConfig, LineConfig, MarkerConfig,
    OscConfig, PathConfig, Scene, SceneConfig, TextStyleConfig, WindowConfig,
};
