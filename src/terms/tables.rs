//! Standard filename term lists.
//!
//! Terms are regular expressions matched case-insensitively against a
//! filename. Most are plain substrings; a handful carry explicit `\b` anchors
//! where the bare token would match too much (`raw` inside `strawberry`,
//! `t0` inside `t05`).

/// Terms indicating raw, unprocessed material.
pub const RAW_TERMS: &[&str] = &[
    r"\braw\b",
    "unprocessed",
    "fresh",
    "uncooked",
    "natural",
    "crude",
    "whole",
];

/// Terms indicating a control, baseline or time-zero sample.
pub const CONTROL_TERMS: &[&str] = &[
    "control",
    "ctrl",
    "cntrl",
    "ctl",
    "uninfected",
    "untreated",
    "baseline",
    "wild_type",
    "wt",
    "wildtype",
    "parental",
    "initial",
    "input",
    r"t0\b",
    "time0",
    "day0",
    r"0h\b",
    r"0hr\b",
    "zerohr",
    "0_hr",
    "pre_treatment",
    "before_processing",
    "pre[-]processing",
    "before[-]processing",
    "mock",
];

/// Terms naming a generic edible plant or fruit part.
pub const GENERIC_EDIBLE_PART_TERMS: &[&str] = &[
    "grain",
    "kernel",
    "seed",
    "berry",
    "endosperm",
    "embryo",
    "germ",
    "cereal",
    "fruit",
    "pulp",
    "flesh",
    "peel",
    "skin",
    "vegetable",
    "leafy_green",
    "root_veg",
    "tuber_veg",
    "edible_part",
    "sample",
];

/// Terms indicating a processed product or a processing step.
pub const PROCESSED_TERMS: &[&str] = &[
    "beer",
    "ale",
    "lager",
    "brew",
    "wort",
    "malt",
    "ferment",
    "sourdough",
    "bread",
    "pasta",
    "noodle",
    "cake",
    "biscuit",
    "cookie",
    "pastry",
    "syrup",
    "starch",
    "ethanol",
    "biofuel",
    "distillate",
    "mash",
    "slurry",
    "cook",
    "bake",
    "baked",
    "fried",
    "toast",
    "roast",
    "steam",
    "boil",
    "autoclave",
    "extract",
    "digest",
    "hydroly[sz](?:ate|ed)",
    "supernatant",
    "pellet",
    "flour",
    "meal",
    "grit",
    "semolina",
    "paste",
    "puree",
    "juice",
    "smoothie",
    "extrude",
    "puff",
    "flake",
    "instant",
    "processed",
];

/// Terms naming non-edible plant parts or tissue cultures.
pub const NON_EDIBLE_PLANT_PART_TERMS: &[&str] = &[
    "leaf",
    "leaves",
    "foliage",
    "stem",
    "stalk",
    "shoot",
    "stover",
    "culm",
    "root",
    "rhizome",
    "seedling",
    "sprout",
    "husk",
    "hull",
    "bran",
    "chaff",
    "glume",
    "lemma",
    "palea",
    "tassel",
    "silk",
    "anther",
    "pollen",
    "flower",
    "callus",
    "cell_culture",
    "suspension_culture",
    "plant_tissue",
];

/// Terms indicating a treatment, pathogen challenge or genetic modification.
pub const TREATMENT_PATHOGEN_TERMS: &[&str] = &[
    "infect",
    "pathogen",
    "disease",
    "lesion",
    "symptom",
    "fungi",
    "bacteria",
    "virus",
    "oomycete",
    "nematode",
    "treat",
    "treatment",
    "stress",
    "elicitor",
    "induc",
    "pesticide",
    "herbicide",
    "fungicide",
    "insecticide",
    "fertilizer",
    "mutant",
    "transgenic",
    "gmo",
    "knockout",
    "overexpress",
];

/// Terms marking QC injections, blanks, standards and instrument runs.
pub const QC_TERMS: &[&str] = &[
    "qc",
    "quality_control",
    "qa",
    "system_suitability",
    "sst",
    "blank",
    "solvent_blank",
    "method_blank",
    "instrument_blank",
    "reagent_blank",
    "wash",
    "equilibration",
    "conditioning",
    "gradient_test",
    "standard",
    "std",
    "ref_mat",
    "reference_material",
    "calib",
    "tune",
    "mass_cal",
    "msms_check",
    "tryptic_digest_std",
];
