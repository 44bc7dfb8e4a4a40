//! Jobs implied by a CI bot name such as `Test-Debian10-Clang-GCE-CPU-AVX2-x86_64-Debug-All-FM`.
use fm_model::{Flag, Job, Source};
use tracing::debug;

use crate::{
    catalog::{Catalog, is_raw},
    error::PlanError,
};

/// Extra flag sets run over every gm on GCE CPU bots, each matching a legacy DM config.
const GCE_GM_CONFIGS: &[&str] = &[
    "--ct g8 --legacy",
    "--ct 565 --legacy",
    "--ct 8888 --legacy",
    "--ct f16",
    "--ct f16 --tf linear",
    "--ct 8888 --gamut p3",
    "--ct 8888 --gamut narrow --tf 2.2",
    "--ct f16 --gamut rec2020 --tf rec2020",
    "--skvm",
    "--skvm --ct f16",
];

const GCE_IMG_CONFIG: &str = "--decodeToDst --ct f16 --gamut rec2020 --tf rec2020";

/// Fields of a bot name this planner cares about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BotInfo<'a> {
    pub os: &'a str,
    pub model: &'a str,
    pub cpu_or_gpu: &'a str,
}

impl<'a> BotInfo<'a> {
    pub fn parse(bot: &'a str) -> Result<Self, PlanError> {
        let parts: Vec<&str> = bot.split('-').collect();
        if parts.len() < 5 {
            return Err(PlanError::BadBotName(bot.to_string()));
        }
        Ok(Self {
            os: parts[1],
            model: parts[3],
            cpu_or_gpu: parts[4],
        })
    }
}

/// Build the job list for `bot`, in submission order. Empty groups produce no job.
pub fn plan(bot: &str, catalog: &Catalog) -> Result<Vec<Job>, PlanError> {
    let info = BotInfo::parse(bot)?;

    let gms = catalog.group("gms");
    let svgs = catalog.group("svgs");
    let skps = catalog.group("skps");
    let tests = catalog.group("tests");
    let mut imgs: Vec<Source> = catalog.group("imgs").to_vec();
    if info.os.contains("Win") {
        // Raw camera formats can't be decoded on Windows.
        imgs.retain(|s| !is_raw(s));
    }

    let mut jobs = Vec::new();
    let mut common: Vec<Flag> = Vec::new();
    let mut run = |sources: &[Source], extra: &str, common: &[Flag]| {
        if sources.is_empty() {
            return;
        }
        let mut flags = Flag::parse_all(extra);
        flags.extend_from_slice(common);
        jobs.push(Job::new(sources.to_vec(), flags));
    };

    if info.cpu_or_gpu == "CPU" {
        common.push(Flag::new("-b", "cpu"));

        // Native fonts for one pass over the gms, portable fonts for everything after.
        run(gms, "--nativeFonts true", &common);
        common.push(Flag::new("--nativeFonts", "false"));

        run(gms, "", &common);
        run(imgs.as_slice(), "", &common);
        run(svgs, "", &common);
        run(skps, "", &common);
        run(tests, "", &common);

        if info.model == "GCE" {
            for config in GCE_GM_CONFIGS {
                run(gms, config, &common);
            }
            run(imgs.as_slice(), GCE_IMG_CONFIG, &common);
        }
    }

    debug!(target: "fm.core.bot", bot, jobs = jobs.len(), "bot plan ready");
    Ok(jobs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        let mut c = Catalog::new();
        c.insert("gm", vec![Source::from("gm1"), Source::from("gm2")]);
        c.insert("test", vec![Source::from("unit1")]);
        c.insert(
            "img",
            vec![Source::from("imgs/a.png"), Source::from("imgs/b.CR2")],
        );
        c.insert("svg", vec![Source::from("svgs/x.svg")]);
        c.insert("skp", vec![]);
        c
    }

    #[test]
    fn parse_picks_os_model_and_device() {
        let info = BotInfo::parse("Test-Debian10-Clang-GCE-CPU-AVX2-x86_64-Debug-All-FM").unwrap();
        assert_eq!(
            info,
            BotInfo {
                os: "Debian10",
                model: "GCE",
                cpu_or_gpu: "CPU"
            }
        );
    }

    #[test]
    fn short_bot_name_is_rejected() {
        let err = plan("Test-Debian10", &catalog()).unwrap_err();
        assert!(matches!(err, PlanError::BadBotName(_)));
    }

    #[test]
    fn gpu_bots_get_nothing() {
        let jobs = plan("Test-Debian10-Clang-NUC-GPU-IntelIris-x86_64-Debug-All-FM", &catalog()).unwrap();
        assert!(jobs.is_empty());
    }

    #[test]
    fn cpu_bot_runs_native_fonts_first_then_portable() {
        let jobs = plan("Test-Debian10-Clang-NUC-CPU-AVX2-x86_64-Debug-All-FM", &catalog()).unwrap();

        // gms twice, imgs, svgs, tests; skps is empty.
        assert_eq!(jobs.len(), 5);
        assert_eq!(
            jobs[0].flags,
            vec![Flag::new("--nativeFonts", "true"), Flag::new("-b", "cpu")]
        );
        for job in &jobs[1..] {
            assert_eq!(
                job.flags,
                vec![Flag::new("-b", "cpu"), Flag::new("--nativeFonts", "false")]
            );
        }
        assert_eq!(jobs[2].sources.len(), 2);
    }

    #[test]
    fn gce_bot_adds_color_configs() {
        let jobs = plan("Test-Debian10-Clang-GCE-CPU-AVX2-x86_64-Debug-All-FM", &catalog()).unwrap();
        assert_eq!(jobs.len(), 5 + GCE_GM_CONFIGS.len() + 1);

        let legacy565 = &jobs[6];
        assert_eq!(
            legacy565.flags,
            vec![
                Flag::new("--ct", "565"),
                Flag::switch("--legacy"),
                Flag::new("-b", "cpu"),
                Flag::new("--nativeFonts", "false"),
            ]
        );

        let last = jobs.last().unwrap();
        assert_eq!(last.sources.len(), 2);
        assert_eq!(last.flags[0], Flag::switch("--decodeToDst"));
    }

    #[test]
    fn windows_bot_drops_raw_images() {
        let jobs = plan("Test-Win10-MSVC-GCE-CPU-AVX2-x86_64-Debug-All-FM", &catalog()).unwrap();
        let imgs = &jobs[2];
        assert_eq!(imgs.sources, vec![Source::from("imgs/a.png")]);
        assert!(jobs.last().unwrap().sources.iter().all(|s| !is_raw(s)));
    }
}
