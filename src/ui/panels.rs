use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::{AppState, View};

// ---------------------------------------------------------------------------
// Left side panel – view and highlight selection
// ---------------------------------------------------------------------------

/// Render the left selection panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Visualização");
    ui.separator();

    for view in View::ALL {
        ui.selectable_value(&mut state.view, view, view.title());
    }
    ui.separator();

    let Some(table) = &state.table else {
        ui.label("Nenhum conjunto de dados carregado.");
        return;
    };

    match state.view {
        View::ContinentTotals => {
            let continents = table.continents();
            ui.strong("Selecione um Continente");
            combo(ui, "continent", &mut state.selected_continent, &continents);
        }
        View::CauseOverYears | View::CauseTotals => {
            let causes = state.cause_options();
            ui.strong("Selecione uma Causa");
            combo(ui, "cause", &mut state.selected_cause, &causes);
        }
        View::YearTrend => {
            let years = table.years();
            ui.strong("Selecione um Ano");
            let current = state
                .selected_year
                .map_or_else(|| "Todos os anos".to_string(), |y| y.to_string());
            egui::ComboBox::from_id_salt("year")
                .selected_text(current)
                .show_ui(ui, |ui: &mut Ui| {
                    ui.selectable_value(&mut state.selected_year, None, "Todos os anos");
                    for year in years {
                        ui.selectable_value(&mut state.selected_year, Some(year), year.to_string());
                    }
                });
        }
        View::ContinentTrend | View::TopCountries => {}
    }
}

/// A combo box over string options bound to an optional selection.
fn combo(ui: &mut Ui, id: &str, selected: &mut Option<String>, options: &[String]) {
    egui::ComboBox::from_id_salt(id)
        .selected_text(selected.clone().unwrap_or_default())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for option in options {
                let is_selected = selected.as_deref() == Some(option.as_str());
                if ui.selectable_label(is_selected, option).clicked() {
                    *selected = Some(option.clone());
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("Arquivo", |ui: &mut Ui| {
            if ui.button("Abrir…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(table), Some(source)) = (&state.table, &state.source) {
            ui.label(format!(
                "{} linhas de {}",
                table.len(),
                source.file_name().map_or_else(
                    || source.display().to_string(),
                    |n| n.to_string_lossy().into_owned()
                )
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Abrir dados de mortes")
        .add_filter("Arquivos suportados", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}
