use eframe::egui::{
    self,
    style::{
        Selection,
        WidgetVisuals,
        Widgets,
    },
    Color32,
    RichText,
    Stroke,
    Visuals,
};

#[derive(Clone)]
pub struct Theme {
    dark: ThemeDetails,
    light: ThemeDetails,
}

impl Default for Theme {
    fn default() -> Self {
        Self::library()
    }
}

impl Theme {
    pub fn library() -> Self {
        Theme { dark: ThemeDetails::ink(), light: ThemeDetails::paper() }
    }

    fn details(&self, ctx: &egui::Context) -> &ThemeDetails {
        match ctx.theme() {
            egui::Theme::Dark => &self.dark,
            egui::Theme::Light => &self.light,
        }
    }

    pub fn heading(&self, ctx: &egui::Context, content: &str) -> RichText {
        RichText::new(content).color(self.details(ctx).accent).strong()
    }

    pub fn muted(&self, ctx: &egui::Context, content: &str) -> RichText {
        RichText::new(content).color(self.details(ctx).muted)
    }

    pub fn required(&self, ctx: &egui::Context) -> Color32 {
        self.details(ctx).red
    }

    pub fn progress(&self, ctx: &egui::Context, finished: bool) -> Color32 {
        let details = self.details(ctx);
        if finished {
            details.green
        } else {
            details.accent
        }
    }
}

#[derive(Clone)]
struct ThemeDetails {
    background: Color32,
    panel: Color32,
    raised: Color32,
    foreground: Color32,
    muted: Color32,
    selection: Color32,
    accent: Color32,
    red: Color32,
    orange: Color32,
    green: Color32,
}

impl ThemeDetails {
    fn ink() -> Self {
        Self {
            background: Color32::from_rgb(30, 28, 34),
            panel: Color32::from_rgb(38, 35, 43),
            raised: Color32::from_rgb(54, 50, 61),
            foreground: Color32::from_rgb(232, 226, 214),
            muted: Color32::from_rgb(150, 142, 160),
            selection: Color32::from_rgb(78, 68, 96),
            accent: Color32::from_rgb(214, 168, 96),
            red: Color32::from_rgb(235, 110, 110),
            orange: Color32::from_rgb(240, 160, 90),
            green: Color32::from_rgb(120, 200, 140),
        }
    }

    fn paper() -> Self {
        Self {
            background: Color32::from_rgb(250, 246, 238),
            panel: Color32::from_rgb(243, 237, 226),
            raised: Color32::from_rgb(255, 252, 246),
            foreground: Color32::from_rgb(52, 44, 36),
            muted: Color32::from_rgb(128, 116, 104),
            selection: Color32::from_rgb(226, 210, 182),
            accent: Color32::from_rgb(150, 92, 40),
            red: Color32::from_rgb(190, 60, 60),
            orange: Color32::from_rgb(200, 120, 50),
            green: Color32::from_rgb(60, 140, 80),
        }
    }
}

pub fn set_theme(ctx: &egui::Context, theme: &Theme) {
    set_theme_variant(ctx, &theme.dark, true);
    set_theme_variant(ctx, &theme.light, false);
}

fn widget(base: WidgetVisuals, fill: Color32, stroke: Color32, text: Color32) -> WidgetVisuals {
    WidgetVisuals {
        bg_fill: fill,
        weak_bg_fill: fill,
        bg_stroke: Stroke { color: stroke, ..base.bg_stroke },
        fg_stroke: Stroke { color: text, ..base.fg_stroke },
        ..base
    }
}

fn set_theme_variant(ctx: &egui::Context, theme: &ThemeDetails, is_dark: bool) {
    let (default, variant) = match is_dark {
        true => (Visuals::dark(), egui::Theme::Dark),
        false => (Visuals::light(), egui::Theme::Light),
    };

    let w = &default.widgets;
    ctx.set_visuals_of(
        variant,
        Visuals {
            dark_mode: is_dark,
            widgets: Widgets {
                noninteractive: widget(
                    w.noninteractive,
                    theme.background,
                    theme.raised,
                    theme.foreground,
                ),
                inactive: widget(w.inactive, theme.raised, theme.panel, theme.foreground),
                hovered: widget(w.hovered, theme.selection, theme.accent, theme.foreground),
                active: widget(w.active, theme.selection, theme.accent, theme.foreground),
                open: widget(w.open, theme.panel, theme.accent, theme.foreground),
            },
            selection: Selection {
                bg_fill: theme.selection,
                stroke: Stroke { color: theme.foreground, ..default.selection.stroke },
            },
            hyperlink_color: theme.accent,
            faint_bg_color: theme.panel,
            extreme_bg_color: theme.raised,
            error_fg_color: theme.red,
            warn_fg_color: theme.orange,
            window_fill: theme.background,
            panel_fill: theme.panel,
            ..default
        },
    );
}
