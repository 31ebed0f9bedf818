//! Built-in solar system data.
//!
//! Radii, distances and periods are visual scales, not physical ones.
//! Eccentricities, perihelion arguments and tilts are the real values,
//! except Pluto, whose orbit is squeezed to stay inside the view.

use crate::components::color::Color;

use super::body::{BodyContent, CelestialBody, Moon, RingBand, RingSystem, Star};

fn hex(rgb: u32) -> Color {
    Color::rgb8((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

fn content(
    name: &str,
    description: &str,
    detail: &str,
    facts: [&str; 3],
    kind: &str,
    feature: &str,
) -> BodyContent {
    BodyContent {
        name: name.to_string(),
        description: description.to_string(),
        detail: detail.to_string(),
        facts: facts.iter().map(|f| f.to_string()).collect(),
        kind: kind.to_string(),
        feature: feature.to_string(),
    }
}

fn moon(name: &str, radius: f64, distance: f64, period: f64, color: u32) -> Moon {
    Moon {
        name: name.to_string(),
        radius,
        distance,
        period,
        color: hex(color),
        retrograde: false,
    }
}

fn rings(colors: &[u32], inner_radius: f64, outer_radius: f64, opacity: f64) -> Option<RingSystem> {
    Some(RingSystem {
        colors: colors.iter().copied().map(hex).collect(),
        inner_radius,
        outer_radius,
        opacity,
        bands: Vec::new(),
    })
}

fn band(radius: f64, width: f64, color: Color, opacity: f64) -> RingBand {
    RingBand {
        radius,
        width,
        color,
        opacity,
    }
}

/// Orbital and visual parameters shared by every planet record.
struct Elements {
    id: &'static str,
    color: u32,
    radius: f64,
    a: f64,
    e: f64,
    arg_peri: f64,
    period: f64,
    tilt: f64,
    temperature: &'static str,
}

fn planet(el: Elements, en: BodyContent, zh: BodyContent) -> CelestialBody {
    CelestialBody {
        id: el.id.to_string(),
        color: hex(el.color),
        radius: el.radius,
        semi_major_axis: el.a,
        eccentricity: el.e,
        argument_of_perihelion: el.arg_peri,
        orbit_period: el.period,
        axial_tilt: el.tilt,
        rings: None,
        moons: Vec::new(),
        temperature: el.temperature.to_string(),
        en,
        zh,
    }
}

pub(super) fn sun() -> Star {
    Star {
        id: "sun".to_string(),
        color: hex(0xfbbf24),
        radius: 60.0,
        corona_radius: 100.0,
        en: content(
            "SUN",
            "The star at the heart of the system.",
            "A G-type main-sequence star holding 99.8% of the solar system's mass. Fusion in its core turns hydrogen into helium.",
            ["4.6 billion years old", "Surface 5500°C", "Holds 99.8% of the mass"],
            "Star",
            "Star",
        ),
        zh: content(
            "太阳",
            "太阳系中心的恒星。",
            "一颗G型主序星，占太阳系总质量的99.8%。核心的核聚变将氢转化为氦。",
            ["约46亿岁", "表面5500°C", "占总质量99.8%"],
            "恒星",
            "恒星",
        ),
    }
}

pub(super) fn planets() -> Vec<CelestialBody> {
    let mercury = planet(
        Elements {
            id: "mercury",
            color: 0xa1a1aa,
            radius: 7.0,
            a: 70.0,
            e: 0.2056,
            arg_peri: 77.46,
            period: 12.0,
            tilt: 0.03,
            temperature: "-180°C ~ 430°C",
        },
        content(
            "Mercury",
            "The swift, cratered messenger.",
            "Closest to the Sun and the smallest planet. It has no atmosphere to retain heat, causing extreme temperature fluctuations.",
            ["Year is 88 days", "Shrinking as it cools", "Most cratered planet"],
            "Terrestrial",
            "Swift",
        ),
        content(
            "水星",
            "敏捷的信使，满布陨石坑。",
            "离太阳最近也是最小的行星。它没有大气层来保持热量，导致极端的昼夜温差。",
            ["一年仅88天", "正在冷却收缩", "陨石坑最多"],
            "类地行星",
            "极速",
        ),
    );

    let venus = planet(
        Elements {
            id: "venus",
            color: 0xfde047,
            radius: 14.0,
            a: 100.0,
            e: 0.0068,
            arg_peri: 131.53,
            period: 20.0,
            tilt: 177.4,
            temperature: "465°C",
        },
        content(
            "Venus",
            "The hottest planet, shrouded in clouds.",
            "Similar in size to Earth but with a toxic atmosphere of carbon dioxide. The greenhouse effect makes it hotter than Mercury.",
            ["Spins backwards", "Longer day than year", "Hottest surface"],
            "Terrestrial",
            "Hottest",
        ),
        content(
            "金星",
            "最热的行星，云层笼罩。",
            "大小与地球相似，但拥有剧毒的二氧化碳大气层。温室效应使其比水星更热。",
            ["逆向自转", "度日如年", "表面温度最高"],
            "类地行星",
            "最热",
        ),
    );

    let mut earth = planet(
        Elements {
            id: "earth",
            color: 0x3b82f6,
            radius: 15.0,
            a: 140.0,
            e: 0.0167,
            arg_peri: 102.94,
            period: 30.0,
            tilt: 23.4,
            temperature: "-88°C ~ 58°C",
        },
        content(
            "Earth",
            "Our home, the blue marble.",
            "The only known planet to harbor life, with liquid water covering 70% of its surface and a protective magnetic field.",
            ["Supports life", "One natural moon", "Densest planet"],
            "Terrestrial",
            "Life",
        ),
        content(
            "地球",
            "我们的家园，蓝色弹珠。",
            "已知唯一孕育生命的星球，表面70%覆盖着液态水，并拥有保护性的磁场。",
            ["孕育生命", "拥有月球", "密度最大"],
            "类地行星",
            "生命",
        ),
    );
    earth.moons = vec![moon("Moon", 4.0, 28.0, 8.0, 0xd4d4d8)];

    let mut mars = planet(
        Elements {
            id: "mars",
            color: 0xef4444,
            radius: 10.0,
            a: 180.0,
            e: 0.0934,
            arg_peri: 336.04,
            period: 45.0,
            tilt: 25.2,
            temperature: "-140°C ~ 20°C",
        },
        content(
            "Mars",
            "The dusty red planet.",
            "Known for its red color due to iron oxide (rust). Home to the largest volcano (Olympus Mons) in the solar system.",
            ["Two moons", "Ancient water", "Huge dust storms"],
            "Terrestrial",
            "Red",
        ),
        content(
            "火星",
            "布满尘埃的红色星球。",
            "因氧化铁（铁锈）而呈现红色。拥有太阳系中最大的火山——奥林帕斯山。",
            ["两颗卫星", "远古水源遗迹", "巨大沙尘暴"],
            "类地行星",
            "赤红",
        ),
    );
    mars.moons = vec![
        moon("Phobos", 2.0, 16.0, 4.0, 0xa8a29e),
        moon("Deimos", 1.5, 22.0, 7.0, 0xd6d3d1),
    ];

    let mut jupiter = planet(
        Elements {
            id: "jupiter",
            color: 0xd97706,
            radius: 45.0,
            a: 260.0,
            e: 0.0489,
            arg_peri: 14.75,
            period: 100.0,
            tilt: 3.1,
            temperature: "-110°C",
        },
        content(
            "Jupiter",
            "King of planets, the gas giant.",
            "The largest planet, composed mostly of hydrogen and helium. Famous for its Great Red Spot, a centuries-old storm.",
            ["Shortest day", "79+ moons", "Strongest magnetosphere"],
            "Gas Giant",
            "Giant",
        ),
        content(
            "木星",
            "行星之王，气态巨行星。",
            "最大的行星，主要由氢和氦组成。以其“大红斑”——一个存在数百年的风暴而闻名。",
            ["自转最快", "79+卫星", "磁场最强"],
            "气态巨行星",
            "巨大",
        ),
    );
    jupiter.rings = rings(&[0x78716c], 1.3, 1.5, 0.25);
    jupiter.moons = vec![
        moon("Io", 3.0, 60.0, 5.0, 0xfde68a),
        moon("Europa", 2.6, 70.0, 8.0, 0xe7e5e4),
        moon("Ganymede", 4.0, 82.0, 12.0, 0xa8a29e),
        moon("Callisto", 3.6, 96.0, 18.0, 0x78716c),
    ];

    let mut saturn = planet(
        Elements {
            id: "saturn",
            color: 0xfcd34d,
            radius: 38.0,
            a: 350.0,
            e: 0.0565,
            arg_peri: 92.43,
            period: 150.0,
            tilt: 26.7,
            temperature: "-140°C",
        },
        content(
            "Saturn",
            "The jewel of the solar system.",
            "Distinguished by its complex ring system made of ice and rock. It is the least dense planet—it would float in water.",
            ["Spectacular rings", "Hexagon storm", "Least dense"],
            "Gas Giant",
            "Rings",
        ),
        content(
            "土星",
            "太阳系的宝石。",
            "以其由冰和岩石组成的复杂环系而著称。它是密度最小的行星——甚至可以漂浮在水上。",
            ["壮观光环", "六边形风暴", "密度最小"],
            "气态巨行星",
            "光环",
        ),
    );
    saturn.rings = rings(&[0xa8a29e, 0xe7e5e4, 0xd6d3d1], 1.2, 2.3, 0.9).map(|mut r| {
        // C ring, B ring, Cassini division, A ring
        r.bands = vec![
            band(1.35, 0.3, r.colors[0], 1.0),
            band(1.72, 0.42, r.colors[1], 1.0),
            band(1.95, 0.05, Color::BLACK, 0.2),
            band(2.15, 0.3, r.colors[2], 1.0),
        ];
        r
    });
    saturn.moons = vec![
        moon("Rhea", 2.0, 95.0, 10.0, 0xd6d3d1),
        moon("Titan", 4.0, 105.0, 14.0, 0xfbbf24),
    ];

    let mut uranus = planet(
        Elements {
            id: "uranus",
            color: 0x22d3ee,
            radius: 25.0,
            a: 440.0,
            e: 0.0457,
            arg_peri: 170.96,
            period: 220.0,
            tilt: 97.8,
            temperature: "-195°C",
        },
        content(
            "Uranus",
            "The tilted ice giant.",
            "Rotates on its side, rolling around the Sun. It has a cold atmosphere containing methane, giving it a blue-green hue.",
            ["Rotates on side", "Coldest atmosphere", "Icy mantle"],
            "Ice Giant",
            "Tilted",
        ),
        content(
            "天王星",
            "躺着的冰巨星。",
            "侧身自转，就像在轨道上滚动一样。大气中含有甲烷，使其呈现蓝绿色。",
            ["侧向自转", "大气最冷", "冰质地幔"],
            "冰巨星",
            "躺平",
        ),
    );
    uranus.rings = rings(&[0xa5f3fc], 1.6, 2.0, 0.4);
    uranus.moons = vec![
        moon("Titania", 2.5, 40.0, 10.0, 0xd6d3d1),
        moon("Oberon", 2.4, 48.0, 14.0, 0xa8a29e),
    ];

    let mut neptune = planet(
        Elements {
            id: "neptune",
            color: 0x3b82f6,
            radius: 25.0,
            a: 520.0,
            e: 0.0113,
            arg_peri: 44.97,
            period: 300.0,
            tilt: 28.3,
            temperature: "-200°C",
        },
        content(
            "Neptune",
            "The windy, distant blue world.",
            "The most distant major planet. Known for supersonic winds and a deep blue color caused by methane.",
            ["Supersonic winds", "Longest orbit", "Dark spots"],
            "Ice Giant",
            "Windy",
        ),
        content(
            "海王星",
            "遥远且多风的蓝色世界。",
            "距离最远的主要行星。以超音速风暴和因甲烷而产生的深蓝色而闻名。",
            ["超音速风", "公转最长", "大暗斑"],
            "冰巨星",
            "狂风",
        ),
    );
    neptune.rings = rings(&[0x94a3b8], 1.5, 1.8, 0.3);
    neptune.moons = vec![Moon {
        retrograde: true,
        ..moon("Triton", 3.0, 40.0, 9.0, 0xfecaca)
    }];

    let mut pluto = planet(
        Elements {
            id: "pluto",
            color: 0xd1d5db,
            radius: 8.0,
            a: 560.0,
            e: 0.1,
            arg_peri: 224.07,
            period: 400.0,
            tilt: 122.5,
            temperature: "-225°C",
        },
        content(
            "Pluto",
            "The dwarf planet at the edge.",
            "Once the 9th planet, reclassified as a dwarf planet in 2006. It has a heart-shaped glacier and orbits in the Kuiper Belt.",
            ["Dwarf planet", "Heart-shaped glacier", "5 moons"],
            "Dwarf Planet",
            "Dwarf",
        ),
        content(
            "冥王星",
            "边缘地带的矮行星。",
            "曾是第九大行星，2006年被重新归类为矮行星。它拥有一颗心形冰川，运行在柯伊伯带中。",
            ["矮行星", "心形冰川", "5颗卫星"],
            "矮行星",
            "矮星",
        ),
    );
    pluto.moons = vec![moon("Charon", 4.0, 16.0, 6.0, 0x9ca3af)];

    vec![mercury, venus, earth, mars, jupiter, saturn, uranus, neptune, pluto]
}
