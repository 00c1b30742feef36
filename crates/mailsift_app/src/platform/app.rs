use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;
use eframe::egui;
use engine_logging::{engine_error, engine_info, mask_secret, LogDestination};
use log::LevelFilter;
use mailsift_core::{update, AppState, AppViewModel, Msg};
use mailsift_engine::{EmailExtractor, EngineHandle, ExtractorSettings, GeminiExtractor, Waker};

use super::effects::{event_to_msg, EffectRunner};
use super::ui;

const LOG_FILE: &str = "mailsift.log";

pub fn run_app() -> anyhow::Result<()> {
    engine_logging::initialize(LogDestination::Both, Path::new(LOG_FILE), LevelFilter::Info);

    let settings = ExtractorSettings::from_env().inspect_err(|err| engine_error!("{}", err))?;
    engine_info!(
        "Starting MailSift: model={} base={} key={}",
        settings.model,
        settings.base_url,
        mask_secret(&settings.api_key)
    );
    let extractor: Arc<dyn EmailExtractor> =
        Arc::new(GeminiExtractor::new(settings).context("failed to build the HTTP client")?);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("AI Email Scraper")
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([560.0, 420.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "MailSift",
        options,
        Box::new(move |cc| {
            let ctx = cc.egui_ctx.clone();
            let waker: Waker = Arc::new(move || ctx.request_repaint());
            let engine = EngineHandle::with_waker(extractor, Some(waker));
            Ok(Box::new(MailSiftApp::new(EffectRunner::new(engine))))
        }),
    )
    .map_err(|err| anyhow::anyhow!("UI terminated with an error: {err}"))?;

    engine_info!("MailSift closed");
    Ok(())
}

struct MailSiftApp {
    state: AppState,
    view: AppViewModel,
    effects: EffectRunner,
}

impl MailSiftApp {
    fn new(effects: EffectRunner) -> Self {
        let state = AppState::new();
        let view = state.view();
        Self {
            state,
            view,
            effects,
        }
    }

    fn process_engine_events(&mut self) {
        while let Some(event) = self.effects.try_recv() {
            self.dispatch_msg(event_to_msg(event));
        }
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            self.view = state.view();
        }
        self.state = state;

        for effect in effects {
            self.effects.run(effect);
        }
    }
}

impl eframe::App for MailSiftApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_engine_events();

        let mut intents = Vec::new();
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| ui::draw(ui, &self.view, &mut intents));
        });

        for msg in intents {
            self.dispatch_msg(msg);
        }
    }
}
