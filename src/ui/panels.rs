use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::document::{read_document, write_document};
use crate::data::loader::{load_file, SAMPLE_METRIC_COLUMN};
use crate::state::{AppState, Section, StatusOrigin};
use crate::ui::{plot, table};

const HEADING_COLOR: Color32 = Color32::from_rgb(0x1E, 0x3A, 0x8A);

// ---------------------------------------------------------------------------
// Left side panel – navigation
// ---------------------------------------------------------------------------

/// Render the navigation sidebar.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Navigation");
    ui.separator();
    ui.label("Go to:");

    for section in Section::ALL {
        ui.radio_value(&mut state.section, section, section.title());
    }

    ui.add_space(8.0);
    ui.separator();
    ui.weak(&state.config.profile.name);
    ui.weak(&state.config.profile.status);
}

// ---------------------------------------------------------------------------
// Central panel – section bodies
// ---------------------------------------------------------------------------

pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    if let Some(msg) = &state.status_message {
        ui.label(RichText::new(msg).color(Color32::RED));
        ui.separator();
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match state.section {
            Section::AcademicProfile => academic_profile(ui, state),
            Section::Research => research(ui, state),
            Section::Publications => publications(ui, state),
            Section::Portfolio => portfolio(ui, state),
            Section::Contact => contact(ui, state),
        });
}

fn title(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).heading().strong().color(HEADING_COLOR));
    ui.add_space(6.0);
}

fn subheading(ui: &mut Ui, text: &str) {
    ui.add_space(8.0);
    ui.label(RichText::new(text).size(18.0).strong().color(HEADING_COLOR));
}

fn bullets(ui: &mut Ui, items: &[String]) {
    for item in items {
        ui.label(format!("• {item}"));
    }
}

fn field(ui: &mut Ui, label: &str, value: &str) {
    ui.horizontal(|ui: &mut Ui| {
        ui.strong(format!("{label}:"));
        ui.label(value);
    });
}

fn academic_profile(ui: &mut Ui, state: &AppState) {
    let p = &state.config.profile;
    title(ui, Section::AcademicProfile.title());

    subheading(ui, "Personal Information");
    field(ui, "Name", &p.name);
    field(ui, "Degree", &p.degree);
    field(ui, "Institution", &p.institution);
    field(ui, "Current Status", &p.status);
    field(ui, "Email", &p.email);

    ui.separator();

    subheading(ui, "Professional Profile");
    for paragraph in &p.summary {
        ui.label(paragraph);
        ui.add_space(4.0);
    }
}

fn research(ui: &mut Ui, state: &AppState) {
    let p = &state.config.profile;
    title(ui, Section::Research.title());

    subheading(ui, "Research Areas");
    bullets(ui, &p.research_areas);

    subheading(ui, "Research Output");
    bullets(ui, &p.research_output);

    subheading(ui, "Teaching & Academic Support");
    bullets(ui, &p.teaching);
}

fn publications(ui: &mut Ui, state: &mut AppState) {
    title(ui, Section::Publications.title());
    ui.label(
        "Upload a CSV containing publications, manuscripts, posters, \
         or conference contributions.",
    );

    if ui.button("Upload Publications (CSV)…").clicked() {
        open_csv_dialog(state);
    }

    let Some(pubs) = &state.publications else {
        return;
    };

    subheading(ui, &pubs.source);
    table::data_grid(ui, "publications", &pubs.table);

    ui.add_space(8.0);
    let response = ui.horizontal(|ui: &mut Ui| {
        ui.label("Filter by keyword");
        ui.text_edit_singleline(&mut state.keyword)
    });
    if response.inner.changed() {
        state.refilter_publications();
    }

    // Re-borrow after the keyword update.
    let Some(pubs) = &state.publications else {
        return;
    };

    if let Some(matches) = &pubs.matches {
        subheading(ui, &format!("Results for '{}'", state.keyword));
        table::data_grid(ui, "publication_matches", matches);
    }

    if let Some((_, counts)) = &pubs.timeline {
        subheading(ui, "Publication Timeline");
        plot::timeline_chart(ui, counts);
    }
}

fn portfolio(ui: &mut Ui, state: &mut AppState) {
    title(ui, Section::Portfolio.title());
    ui.label("Analysis, modelling and visualisation of scientific data.");

    subheading(ui, "Physics and Modelling Data");
    table::data_grid(ui, "sample", &state.sample);

    ui.add_space(8.0);
    ui.strong(format!("Filter by {SAMPLE_METRIC_COLUMN}"));
    let [min, max] = state.config.metric_range;
    let mut low = state.metric_low;
    let mut high = state.metric_high;
    let low_changed = ui
        .add(egui::Slider::new(&mut low, min..=max).text("low"))
        .changed();
    let high_changed = ui
        .add(egui::Slider::new(&mut high, min..=max).text("high"))
        .changed();
    if low_changed || high_changed {
        state.set_metric_range(low, high);
    }

    subheading(ui, "Filtered Results");
    table::data_grid(ui, "filtered_sample", &state.filtered_sample);

    subheading(ui, "Metric vs Time");
    plot::metric_chart(ui, SAMPLE_METRIC_COLUMN, &state.metric_series);

    ui.separator();

    if ui.button("Download research document…").clicked() {
        save_document_dialog(state);
    }

    subheading(ui, "Technical Skills");
    bullets(ui, &state.config.profile.skills);
}

fn contact(ui: &mut Ui, state: &AppState) {
    let p = &state.config.profile;
    title(ui, Section::Contact.title());

    field(ui, "Email", &p.email);
    if let Some(linkedin) = &p.linkedin {
        ui.horizontal(|ui: &mut Ui| {
            ui.strong("LinkedIn:");
            ui.hyperlink(linkedin);
        });
    }
    ui.add_space(6.0);
    ui.label(&p.availability);
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Upload publications…").clicked() {
                open_csv_dialog(state);
                ui.close_menu();
            }
            if ui.button("Save research document…").clicked() {
                save_document_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(pubs) = &state.publications {
            let shown = pubs.matches.as_ref().map_or(pubs.table.len(), |m| m.len());
            ui.label(format!(
                "{}: {} records, {} matching",
                pubs.source,
                pubs.table.len(),
                shown
            ));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_csv_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Upload publications")
        .add_filter("CSV", &["csv"])
        .pick_file();

    let Some(path) = file else {
        return;
    };

    match load_file(&path) {
        Ok(table) => {
            log::info!(
                "Loaded {} records with columns {:?} from {}",
                table.len(),
                table.schema().names().collect::<Vec<_>>(),
                path.display()
            );
            let source = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            state.set_publications(source, table);
        }
        Err(e) => {
            log::error!("Failed to load {}: {e}", path.display());
            state.report_error(StatusOrigin::Publications, &e);
        }
    }
}

pub fn save_document_dialog(state: &mut AppState) {
    let src = state.config.document_path.clone();
    let bytes = match read_document(&src) {
        Ok(bytes) => bytes,
        Err(e) => {
            state.report_error(StatusOrigin::Document, &e);
            return;
        }
    };
    let default_name = src
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "research.pdf".to_string());

    let dest = rfd::FileDialog::new()
        .set_title("Save research document")
        .set_file_name(default_name)
        .add_filter("PDF", &["pdf"])
        .save_file();

    let Some(dest) = dest else {
        return;
    };

    match write_document(&dest, &bytes) {
        Ok(()) => state.clear_status(StatusOrigin::Document),
        Err(e) => state.report_error(StatusOrigin::Document, &e),
    }
}
