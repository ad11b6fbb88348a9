//! DD Shape Builder.
//!
//! Zeilenorientierter Host: liest Befehle von stdin, treibt den
//! `AppController` und gibt abgeschlossene Formen als JSON aus.

use anyhow::{anyhow, bail, Context};
use dd_shape_builder::{AppController, AppIntent, AppState, ShapeField, ShapeKind, ToolOptions};
use glam::DVec2;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

const HELP: &str = "\
Befehle:
  tool <line|ellipse|rings>   Form-Tool wählen
  click <lon> <lat>           Kartenklick
  move <lon> <lat>            Cursor bewegen
  set <feld> <wert>           Zahlenwert setzen (Anzeige-Einheit)
  type <feld> <text>          Feldtext eingeben
  unit <m|km|mi|nm|ft|yd>     Distanz-Einheit
  azunit <degrees|mils|gradians>
  mode <semi|full>            Achsen-Anzeige
  format <dd|ddm|dms>         Koordinaten-Format
  enter | esc                 Abschließen / Abbrechen
  status                      Status und Feldtexte
  save [pfad]                 Optionen speichern
  quit";

fn main() -> anyhow::Result<()> {
    AppRunner::run()
}

struct AppRunner;

impl AppRunner {
    fn run() -> anyhow::Result<()> {
        // Logger initialisieren
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();

        log::info!("DD Shape Builder v{} startet...", env!("CARGO_PKG_VERSION"));

        // Optionen aus TOML laden (oder Standardwerte)
        let config_path = ToolOptions::config_path();
        let options = ToolOptions::load_from_file(&config_path);

        let mut app = HostApp::new(options);
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        for line in stdin.lock().lines() {
            let line = line.context("stdin nicht lesbar")?;
            if let Err(e) = app.process_line(&line, &mut stdout) {
                writeln!(stdout, "Fehler: {e}")?;
            }
            if app.state.should_exit {
                break;
            }
        }

        log::info!("DD Shape Builder beendet");
        Ok(())
    }
}

/// Vom Host verstandene Befehle.
#[derive(Debug, Clone)]
enum HostCommand {
    /// Weiterleitung an den Controller
    Intent(AppIntent),
    /// Statuszeile und Feldtexte ausgeben
    Status,
    /// Befehlsübersicht
    Help,
}

/// Host-Zustand: App-State + Controller
struct HostApp {
    state: AppState,
    controller: AppController,
}

impl HostApp {
    fn new(options: ToolOptions) -> Self {
        let mut controller = AppController::new();
        controller.set_finalize_callback(|result| match serde_json::to_string(result) {
            Ok(json) => println!("{json}"),
            Err(e) => log::warn!("Form nicht serialisierbar: {}", e),
        });

        Self {
            state: AppState::with_options(options),
            controller,
        }
    }

    fn process_line(&mut self, line: &str, out: &mut impl Write) -> anyhow::Result<()> {
        let Some(command) = parse_command(line)? else {
            return Ok(());
        };
        match command {
            HostCommand::Intent(intent) => {
                self.controller.handle_intent(&mut self.state, intent)?;
            }
            HostCommand::Status => self.write_status(out)?,
            HostCommand::Help => writeln!(out, "{HELP}")?,
        }
        Ok(())
    }

    fn write_status(&self, out: &mut impl Write) -> anyhow::Result<()> {
        writeln!(out, "{}", self.state.status_line())?;
        if let Some(tool) = self.state.editor.active_tool() {
            for &field in tool.fields() {
                let text = tool.field_text(field).unwrap_or_default();
                writeln!(out, "  {} = {}", field.name(), text)?;
            }
        }
        writeln!(out, "  Formen abgeschlossen: {}", self.state.finished_shapes.len())?;
        Ok(())
    }
}

/// Zerlegt eine Eingabezeile. Leere Zeilen und `#`-Kommentare ergeben `None`.
fn parse_command(line: &str) -> anyhow::Result<Option<HostCommand>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let intent = match verb.to_lowercase().as_str() {
        "tool" => AppIntent::ToolSelected {
            kind: rest.parse::<ShapeKind>()?,
        },
        "click" => AppIntent::MapClicked {
            pos: parse_point(rest)?,
        },
        "move" => AppIntent::CursorMoved {
            pos: parse_point(rest)?,
        },
        "set" => {
            let (field, value) = split_field(rest)?;
            let value = value
                .parse::<f64>()
                .with_context(|| format!("Kein Zahlenwert: '{value}'"))?;
            AppIntent::FieldValueEntered { field, value }
        }
        "type" => {
            // Leerer Text ist erlaubt (Feld leeren)
            let (name, text) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            AppIntent::FieldTextEdited {
                field: name.parse::<ShapeField>()?,
                text: text.to_string(),
            }
        }
        "unit" => AppIntent::LinearUnitSelected { unit: rest.parse()? },
        "azunit" => AppIntent::AzimuthUnitSelected { unit: rest.parse()? },
        "mode" => AppIntent::EllipseModeSelected { mode: rest.parse()? },
        "format" => AppIntent::CoordinateFormatSelected {
            format: rest.parse()?,
        },
        "enter" => AppIntent::EnterPressed,
        "esc" | "escape" => AppIntent::EscapePressed,
        "save" => AppIntent::SaveOptionsRequested {
            path: (!rest.is_empty()).then(|| PathBuf::from(rest)),
        },
        "quit" | "exit" => AppIntent::ExitRequested,
        "status" => return Ok(Some(HostCommand::Status)),
        "help" | "?" => return Ok(Some(HostCommand::Help)),
        other => bail!("Unbekannter Befehl: '{other}' (help für Übersicht)"),
    };
    Ok(Some(HostCommand::Intent(intent)))
}

fn parse_point(args: &str) -> anyhow::Result<DVec2> {
    let mut parts = args.split_whitespace();
    let (Some(lon), Some(lat), None) = (parts.next(), parts.next(), parts.next()) else {
        bail!("Erwartet: <lon> <lat>");
    };
    let lon = lon
        .parse::<f64>()
        .map_err(|_| anyhow!("Ungültige Länge: '{lon}'"))?;
    let lat = lat
        .parse::<f64>()
        .map_err(|_| anyhow!("Ungültige Breite: '{lat}'"))?;
    Ok(DVec2::new(lon, lat))
}

fn split_field(args: &str) -> anyhow::Result<(ShapeField, &str)> {
    let Some((name, value)) = args.split_once(char::is_whitespace) else {
        bail!("Erwartet: <feld> <wert>");
    };
    Ok((name.parse::<ShapeField>()?, value.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dd_shape_builder::{AzimuthUnit, CoordinateFormat, LinearUnit};

    fn intent(line: &str) -> AppIntent {
        match parse_command(line).unwrap() {
            Some(HostCommand::Intent(intent)) => intent,
            other => panic!("Intent erwartet, erhalten: {other:?}"),
        }
    }

    #[test]
    fn test_parse_click_and_move() {
        assert!(matches!(
            intent("click 8.5 47.25"),
            AppIntent::MapClicked { pos } if pos == DVec2::new(8.5, 47.25)
        ));
        assert!(matches!(
            intent("  MOVE -3 40 "),
            AppIntent::CursorMoved { pos } if pos == DVec2::new(-3.0, 40.0)
        ));
        assert!(parse_command("click 8.5").is_err());
        assert!(parse_command("click 8.5 47 1").is_err());
        assert!(parse_command("click x 47").is_err());
    }

    #[test]
    fn test_parse_fields() {
        assert!(matches!(
            intent("set major 1500"),
            AppIntent::FieldValueEntered { field: ShapeField::MajorAxis, value } if value == 1500.0
        ));
        assert!(matches!(
            intent("type az 12,5"),
            AppIntent::FieldTextEdited { field: ShapeField::Azimuth, ref text } if text == "12,5"
        ));
        assert!(matches!(
            intent("type minor"),
            AppIntent::FieldTextEdited { field: ShapeField::MinorAxis, ref text } if text.is_empty()
        ));
        assert!(parse_command("set major viel").is_err());
        assert!(parse_command("set breite 3").is_err());
    }

    #[test]
    fn test_parse_units_and_modes() {
        assert!(matches!(
            intent("unit km"),
            AppIntent::LinearUnitSelected { unit: LinearUnit::Kilometers }
        ));
        assert!(matches!(
            intent("azunit mils"),
            AppIntent::AzimuthUnitSelected { unit: AzimuthUnit::Mils }
        ));
        assert!(matches!(
            intent("format dms"),
            AppIntent::CoordinateFormatSelected { format: CoordinateFormat::Dms }
        ));
        assert!(matches!(intent("tool rings"), AppIntent::ToolSelected { kind: ShapeKind::RangeRings }));
        assert!(parse_command("unit furlong").is_err());
    }

    #[test]
    fn test_parse_misc() {
        assert!(parse_command("").unwrap().is_none());
        assert!(parse_command("# Kommentar").unwrap().is_none());
        assert!(matches!(parse_command("status").unwrap(), Some(HostCommand::Status)));
        assert!(matches!(
            intent("save"),
            AppIntent::SaveOptionsRequested { path: None }
        ));
        assert!(matches!(
            intent("save /tmp/opts.toml"),
            AppIntent::SaveOptionsRequested { path: Some(ref p) } if p == &PathBuf::from("/tmp/opts.toml")
        ));
        assert!(matches!(intent("quit"), AppIntent::ExitRequested));
        assert!(parse_command("fliegen").is_err());
    }

    #[test]
    fn test_host_status_lists_fields() {
        let mut app = HostApp::new(ToolOptions::default());
        let mut out = Vec::new();
        app.process_line("tool line", &mut out).unwrap();
        app.process_line("click 8 47", &mut out).unwrap();
        app.process_line("set distance 1000", &mut out).unwrap();
        app.process_line("status", &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Linie: "));
        assert!(text.contains("Anker: 47.000000 N 8.000000 E"));
        assert!(text.contains("distance = 1000"));
        assert!(text.contains("Formen abgeschlossen: 0"));
    }
}
