// SPDX-License-Identifier: MPL-2.0
use std::error::Error;
use std::path::PathBuf;
use std::rc::Rc;

use koment::component::{BaseComponent, Component};
use koment::config::{self, Config};
use koment::diagnostics::{BufferCapacity, DiagnosticsCollector};
use koment::host::Host;
use koment::i18n::{self, Translations, DEFAULT_LANGUAGE};
use koment::registry;

struct Flags {
    lang: Option<String>,
    config_path: Option<PathBuf>,
    root_class: String,
}

fn parse_flags() -> Result<Flags, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    let flags = Flags {
        lang: args.opt_value_from_str("--lang")?,
        config_path: args.opt_value_from_str("--config")?,
        root_class: args
            .finish()
            .into_iter()
            .next()
            .and_then(|s| s.into_string().ok())
            .unwrap_or_else(|| "Component".to_string()),
    };
    Ok(flags)
}

fn print_tree(component: &Component, depth: usize) {
    let classes = component.el().map(|el| el.class_name()).unwrap_or_default();
    println!(
        "{:indent$}{} [{}] {} .{}",
        "",
        component.id(),
        component.class_name(),
        component.name().unwrap_or("-"),
        classes,
        indent = depth * 2
    );
    for child in component.children() {
        print_tree(&child, depth + 1);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let flags = parse_flags()?;

    let config: Config = match &flags.config_path {
        Some(path) => config::load_from_path(path)?,
        None => config::load().unwrap_or_default(),
    };

    let capacity = BufferCapacity::new(
        config
            .diagnostics_buffer_capacity
            .unwrap_or(config::DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY),
    );
    let mut collector = DiagnosticsCollector::new(capacity);
    let host = Host::new(config.player_id(), collector.handle());

    let mut translations = Translations::bundled();
    for (code, table) in &config.languages {
        translations.merge(code, table.clone());
    }
    let available = translations.available_locales();
    host.set_translations(translations);
    let locale = i18n::resolve_locale(flags.lang.as_deref(), &config, &available)
        .map_or_else(|| DEFAULT_LANGUAGE.to_string(), |lang| lang.to_string());
    host.set_language(Some(&locale));

    for (name, css_class) in &config.classes {
        registry::register_component(name, Rc::new(BaseComponent::named(name, css_class)));
    }

    let root = host.mount(&flags.root_class, config.player.clone())?;
    root.trigger_ready();
    host.scheduler().run_until_idle();

    println!("{} ({locale}): {}", host.id(), host.localize("Loaded"));
    print_tree(&root, 0);

    host.unmount();
    collector.process_pending();
    println!("{}", collector.export_json()?);
    Ok(())
}
