use godot::prelude::*;

mod logger;
mod player;
mod shared;

use logger::GodotLogger;

/// GDExtension entry point
struct ControllerExtension;

#[gdextension]
unsafe impl ExtensionLibrary for ControllerExtension {
    fn on_level_init(level: InitLevel) {
        if level == InitLevel::Scene {
            GodotLogger::clear_log_file();
            controller_simulation::set_logger_if_needed(Box::new(GodotLogger));
            controller_simulation::log_info("SpringPlayer extension loaded");
        }
    }
}
