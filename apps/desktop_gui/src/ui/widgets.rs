use client_core::CompanyCard;
use eframe::egui;

const ACTIVE_GREEN: egui::Color32 = egui::Color32::from_rgb(46, 125, 50);
const INACTIVE_GREY: egui::Color32 = egui::Color32::from_rgb(117, 117, 117);

/// Error banner without a dismiss action; it stays until the next load.
pub fn error_banner(ui: &mut egui::Ui, message: &str) {
    egui::Frame::NONE
        .fill(egui::Color32::from_rgb(111, 53, 53))
        .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)))
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(10, 8))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new(message).color(egui::Color32::WHITE));
        });
}

pub fn status_badge(ui: &mut egui::Ui, card: &CompanyCard) {
    let fill = if card.is_active {
        ACTIVE_GREEN
    } else {
        INACTIVE_GREY
    };
    egui::Frame::NONE
        .fill(fill)
        .corner_radius(6.0)
        .inner_margin(egui::Margin::symmetric(6, 2))
        .show(ui, |ui| {
            ui.label(
                egui::RichText::new(card.status_label())
                    .small()
                    .color(egui::Color32::WHITE),
            );
        });
}

/// Renders one company card. Returns true when "Details" was clicked.
pub fn company_card(ui: &mut egui::Ui, card: &CompanyCard) -> bool {
    let mut open_details = false;
    egui::Frame::group(ui.style())
        .corner_radius(8.0)
        .inner_margin(egui::Margin::same(10))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(egui::RichText::new(&card.title).strong().size(16.0));
                    ui.label(egui::RichText::new(&card.handle).weak());
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                    status_badge(ui, card);
                });
            });
            ui.add_space(4.0);

            if let Some(phone) = &card.phone {
                ui.label(format!("Phone: {phone}"));
            }
            if let Some(address) = &card.address {
                ui.label(format!("Address: {address}"));
            }
            if let Some(total) = card.total_count() {
                ui.label(format!("Headcount: {total}"));
            }
            ui.label(egui::RichText::new(format!("Created {}", card.created_on)).small());

            ui.add_space(4.0);
            if ui.button("Details").clicked() {
                open_details = true;
            }
        });
    open_details
}

/// Detail dialog. Returns false once the user closed it.
pub fn detail_window(ctx: &egui::Context, card: &CompanyCard) -> bool {
    let mut keep_open = true;
    let mut close_clicked = false;
    egui::Window::new(egui::RichText::new(&card.title).strong())
        .id(egui::Id::new(("company_details", card.id.as_str())))
        .open(&mut keep_open)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            egui::Grid::new("company_detail_rows")
                .num_columns(2)
                .spacing([16.0, 6.0])
                .show(ui, |ui| {
                    for (label, value) in card.detail_rows() {
                        ui.label(egui::RichText::new(label).strong());
                        if label == "Status" {
                            status_badge(ui, card);
                        } else {
                            ui.label(value);
                        }
                        ui.end_row();
                    }
                });
            ui.add_space(8.0);
            if ui.button("Close").clicked() {
                close_clicked = true;
            }
        });
    keep_open && !close_clicked
}
