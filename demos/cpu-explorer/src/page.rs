use wisp_engine::{
    AccordionSpec, BannerSpec, CoresSpec, EmblemSpec, GroupSpec, HoverSpec, NavSpec, Page,
    PageManifest, ParallaxSpec, RevealKind, RippleSpec, StartButtonSpec,
};

/// The CPU Explorer landing page. Everything it does is declared in the
/// manifest; the engine and bridge carry it from there.
pub struct CpuExplorer;

impl CpuExplorer {
    pub fn new() -> Self {
        Self
    }
}

impl Page for CpuExplorer {
    fn manifest(&self) -> PageManifest {
        PageManifest {
            groups: vec![
                GroupSpec::new(".fade-in", RevealKind::FadeIn),
                GroupSpec::new(".pipeline-step", RevealKind::PipelineStep),
                GroupSpec::new("section", RevealKind::Section).with_start_visible(".hero"),
                GroupSpec::new(".stat-card", RevealKind::StatCard).with_inner(".stat-number"),
                GroupSpec::new(".speed-item", RevealKind::SpeedBar).with_inner(".bar-fill"),
            ],
            nav: Some(NavSpec {
                menu_button: Some(".nav-menu-btn".into()),
                menu: Some(".nav-links".into()),
                active_class: "active".into(),
                anchor_offset_px: 80.0,
                start_button: Some(StartButtonSpec {
                    button: "#start-learning".into(),
                    target: "#what-is-cpu".into(),
                }),
            }),
            accordion: Some(AccordionSpec {
                item: ".faq-item".into(),
                question: ".faq-question".into(),
                active_class: "active".into(),
            }),
            cores: Some(CoresSpec {
                display: "#cores-display".into(),
                buttons: ".core-btn".into(),
                count_attr: "data-cores".into(),
                initial: 1,
                active_class: "active".into(),
                box_class: "core".into(),
                label: "Core".into(),
                status: "Processing...".into(),
            }),
            ripple: Some(RippleSpec { selector: ".btn".into() }),
            hover: Some(HoverSpec {
                card: ".component-card".into(),
                icon: ".component-icon".into(),
            }),
            emblem: Some(EmblemSpec { selector: ".logo-chip".into(), clicks: 5 }),
            parallax: Some(ParallaxSpec { selector: ".color-blob".into() }),
            progress_bar: true,
            body_fade: true,
            banner: Some(BannerSpec {
                title: "\u{26a1} CPU Explorer".into(),
                subtitle: Some("Learn how computer processors work!".into()),
            }),
        }
    }
}
