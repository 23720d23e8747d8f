use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryTag {
    Animals,
    Vehicles,
    People,
    Buildings,
    Space,
    Objects,
    Fictional,
    StarWars,
    StarTrek,
    Halo,
    Marvel,
    MassEffect,
    #[serde(rename = "warhammer-40k")]
    Warhammer40k,
    Alien,
    Terminator,
    Predator,
    Minecraft,
    HarryPotter,
    LordOfTheRings,
    GameOfThrones,
    Zelda,
    Dnd,
    Pokemon,
}

impl CategoryTag {
    pub const ALL: [CategoryTag; 23] = [
        CategoryTag::Animals,
        CategoryTag::Vehicles,
        CategoryTag::People,
        CategoryTag::Buildings,
        CategoryTag::Space,
        CategoryTag::Objects,
        CategoryTag::Fictional,
        CategoryTag::StarWars,
        CategoryTag::StarTrek,
        CategoryTag::Halo,
        CategoryTag::Marvel,
        CategoryTag::MassEffect,
        CategoryTag::Warhammer40k,
        CategoryTag::Alien,
        CategoryTag::Terminator,
        CategoryTag::Predator,
        CategoryTag::Minecraft,
        CategoryTag::HarryPotter,
        CategoryTag::LordOfTheRings,
        CategoryTag::GameOfThrones,
        CategoryTag::Zelda,
        CategoryTag::Dnd,
        CategoryTag::Pokemon,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CategoryTag::Animals => "animals",
            CategoryTag::Vehicles => "vehicles",
            CategoryTag::People => "people",
            CategoryTag::Buildings => "buildings",
            CategoryTag::Space => "space",
            CategoryTag::Objects => "objects",
            CategoryTag::Fictional => "fictional",
            CategoryTag::StarWars => "star-wars",
            CategoryTag::StarTrek => "star-trek",
            CategoryTag::Halo => "halo",
            CategoryTag::Marvel => "marvel",
            CategoryTag::MassEffect => "mass-effect",
            CategoryTag::Warhammer40k => "warhammer-40k",
            CategoryTag::Alien => "alien",
            CategoryTag::Terminator => "terminator",
            CategoryTag::Predator => "predator",
            CategoryTag::Minecraft => "minecraft",
            CategoryTag::HarryPotter => "harry-potter",
            CategoryTag::LordOfTheRings => "lord-of-the-rings",
            CategoryTag::GameOfThrones => "game-of-thrones",
            CategoryTag::Zelda => "zelda",
            CategoryTag::Dnd => "dnd",
            CategoryTag::Pokemon => "pokemon",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            CategoryTag::Animals => "Animals",
            CategoryTag::Vehicles => "Vehicles",
            CategoryTag::People => "People",
            CategoryTag::Buildings => "Buildings",
            CategoryTag::Space => "Space",
            CategoryTag::Objects => "Objects",
            CategoryTag::Fictional => "Fictional",
            CategoryTag::StarWars => "Star Wars",
            CategoryTag::StarTrek => "Star Trek",
            CategoryTag::Halo => "Halo",
            CategoryTag::Marvel => "Marvel",
            CategoryTag::MassEffect => "Mass Effect",
            CategoryTag::Warhammer40k => "Warhammer 40K",
            CategoryTag::Alien => "Alien",
            CategoryTag::Terminator => "Terminator",
            CategoryTag::Predator => "Predator",
            CategoryTag::Minecraft => "Minecraft",
            CategoryTag::HarryPotter => "Harry Potter",
            CategoryTag::LordOfTheRings => "Lord of the Rings",
            CategoryTag::GameOfThrones => "Game of Thrones",
            CategoryTag::Zelda => "Zelda",
            CategoryTag::Dnd => "D&D",
            CategoryTag::Pokemon => "Pokémon",
        }
    }
}

impl fmt::Display for CategoryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryTag {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self> {
        let normalized = raw.trim().to_lowercase().replace(['_', ' '], "-");

        let tag = match normalized.as_str() {
            "animals" | "animal" => CategoryTag::Animals,
            "vehicles" | "vehicle" => CategoryTag::Vehicles,
            "people" | "person" => CategoryTag::People,
            "buildings" | "building" => CategoryTag::Buildings,
            "space" => CategoryTag::Space,
            "objects" | "object" => CategoryTag::Objects,
            "fictional" => CategoryTag::Fictional,
            "star-wars" | "starwars" => CategoryTag::StarWars,
            "star-trek" | "startrek" => CategoryTag::StarTrek,
            "halo" => CategoryTag::Halo,
            "marvel" => CategoryTag::Marvel,
            "mass-effect" | "masseffect" => CategoryTag::MassEffect,
            "warhammer-40k" | "warhammer40k" | "40k" => CategoryTag::Warhammer40k,
            "alien" | "aliens" => CategoryTag::Alien,
            "terminator" => CategoryTag::Terminator,
            "predator" => CategoryTag::Predator,
            "minecraft" => CategoryTag::Minecraft,
            "harry-potter" | "harrypotter" => CategoryTag::HarryPotter,
            "lord-of-the-rings" | "lotr" => CategoryTag::LordOfTheRings,
            "game-of-thrones" | "got" => CategoryTag::GameOfThrones,
            "zelda" => CategoryTag::Zelda,
            "dnd" | "d&d" => CategoryTag::Dnd,
            "pokemon" | "pokémon" => CategoryTag::Pokemon,
            _ => bail!(
                "Unknown category: {raw}. Supported categories: {}",
                CategoryTag::ALL
                    .iter()
                    .map(|tag| tag.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        };

        Ok(tag)
    }
}

/// Parses user supplied category tags, dropping the ones that are not recognised.
pub fn parse_category_list<S: AsRef<str>>(values: &[S]) -> Vec<CategoryTag> {
    let mut tags = Vec::new();

    for value in values {
        match value.as_ref().parse::<CategoryTag>() {
            Ok(tag) if !tags.contains(&tag) => tags.push(tag),
            Ok(_) => {}
            Err(error) => warn!(error = %error, "ignoring unknown category tag"),
        }
    }

    tags
}

struct CategoryRule {
    tag: CategoryTag,
    keywords: &'static [&'static str],
}

impl CategoryRule {
    fn matches(&self, normalized: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| normalized.contains(keyword))
    }
}

const POKEMON_NAMES: &[&str] = &[
    "pikachu", "charizard", "mewtwo", "snorlax", "onix", "steelix", "gyarados", "wailord",
    "groudon", "kyogre", "rayquaza", "lugia", "ho-oh", "metagross", "golem", "cosmoem",
    "celesteela", "eternatus", "dialga", "palkia", "giratina", "hippowdon", "mudsdale",
    "bulbasaur", "squirtle", "eevee", "lapras", "dragonite", "tyranitar", "aggron",
];

// Rule order matters: the first rule with a matching keyword decides the category.
const FRANCHISE_RULES: &[CategoryRule] = &[
    CategoryRule {
        tag: CategoryTag::StarWars,
        keywords: &[
            "chewbacca", "wookiee", "death star", "x-wing", "tie fighter", "millennium falcon",
            "star destroyer", "at-at", "at-st", "r2-d2", "c-3po", "bb-8", "darth vader", "yoda",
            "lightsaber", "jabba", "rancor", "sandcrawler", "tauntaun", "bantha", "ewok",
            "stormtrooper", "sarlacc", "wampa", "grogu", "mandalorian",
        ],
    },
    CategoryRule {
        tag: CategoryTag::StarTrek,
        keywords: &[
            "uss ", "enterprise", "starfleet", "klingon", "borg cube", "romulan", "tribble",
            "spock", "shuttlecraft", "tricorder", "phaser",
        ],
    },
    CategoryRule {
        tag: CategoryTag::Halo,
        keywords: &[
            "master chief", "spartan", "warthog", "scorpion tank", "pelican dropship", "covenant",
            "sangheili", "scarab", "mjolnir armor", "halo ring", "pillar of autumn",
        ],
    },
    CategoryRule {
        tag: CategoryTag::Marvel,
        keywords: &[
            "iron man", "hulk", "mjolnir", "captain america", "vibranium", "helicarrier", "thanos",
            "groot", "venom", "spider-man", "galactus", "sentinel", "quinjet", "infinity gauntlet",
            "black panther", "ant-man",
        ],
    },
    CategoryRule {
        tag: CategoryTag::MassEffect,
        keywords: &[
            "normandy", "reaper", "m35 mako", "krogan", "thresher maw", "citadel", "mass relay",
            "geth", "turian", "asari",
        ],
    },
    CategoryRule {
        tag: CategoryTag::Warhammer40k,
        keywords: &[
            "space marine", "imperator titan", "warlord titan", "land raider", "baneblade",
            "dreadnought", "tyranid", "necron", "golden throne", "squiggoth", "gargant",
            "leman russ",
        ],
    },
    CategoryRule {
        tag: CategoryTag::Alien,
        keywords: &[
            "xenomorph", "facehugger", "chestburster", "alien queen", "power loader", "nostromo",
            "sulaco", "weyland-yutani",
        ],
    },
    CategoryRule {
        tag: CategoryTag::Terminator,
        keywords: &[
            "terminator", "t-800", "t-1000", "hunter-killer", "skynet",
        ],
    },
    CategoryRule {
        tag: CategoryTag::Predator,
        keywords: &[
            "predator", "yautja",
        ],
    },
    CategoryRule {
        tag: CategoryTag::Minecraft,
        keywords: &[
            "minecraft", "creeper", "enderman", "ender dragon", "wither", "iron golem", "ghast",
        ],
    },
    CategoryRule {
        tag: CategoryTag::HarryPotter,
        keywords: &[
            "hogwarts", "hagrid", "dobby", "buckbeak", "hippogriff", "basilisk", "knight bus",
            "aragog", "nimbus 2000", "firebolt", "whomping willow", "gringotts", "golden snitch",
            "horntail",
        ],
    },
    CategoryRule {
        tag: CategoryTag::LordOfTheRings,
        keywords: &[
            "hobbit", "gandalf", "mumak", "oliphaunt", "balrog", "nazgul", "fell beast",
            "treebeard", "shelob", "barad-dur", "one ring", "smaug", "sauron", "gollum", "uruk-hai",
            "cave troll",
        ],
    },
    CategoryRule {
        tag: CategoryTag::GameOfThrones,
        keywords: &[
            "drogon", "rhaegal", "viserion", "iron throne", "direwolf", "white walker",
            "the mountain", "hodor", "wildling", "wun wun",
        ],
    },
    CategoryRule {
        tag: CategoryTag::Zelda,
        keywords: &[
            "hyrule", "hylian", "ganon", "master sword", "korok", "lynel", "dodongo", "epona",
            "divine beast", "moblin", "hinox",
        ],
    },
    CategoryRule {
        tag: CategoryTag::Dnd,
        keywords: &[
            "beholder", "tarrasque", "owlbear", "mind flayer", "gelatinous cube", "bag of holding",
            "d20", "mimic", "displacer beast", "kobold", "bugbear",
        ],
    },
];

const GENERAL_RULES: &[CategoryRule] = &[
    CategoryRule {
        tag: CategoryTag::Space,
        keywords: &[
            "rocket", "saturn v", "space shuttle", "space station", "satellite", "spacex",
            "falcon 9", "moon", "asteroid", "comet", "planet", "mars rover", "lunar", "apollo",
            "hubble", "voyager", "sputnik", "space telescope",
        ],
    },
    CategoryRule {
        tag: CategoryTag::Buildings,
        keywords: &[
            "tower", "building", "statue", "bridge", "pyramid", "colosseum", "cathedral",
            "skyscraper", "castle", "stadium", "hoover dam", "gorges dam", "burj", "monument",
            "lighthouse", "great wall", "taj mahal", "pentagon", "temple", "palace", "white house",
            "opera house",
        ],
    },
    CategoryRule {
        tag: CategoryTag::Animals,
        keywords: &[
            "elephant", "whale", "house cat", "kitten", "lion", "tiger", "cheetah",
            "golden retriever", "great dane", "labrador", "chihuahua", "corgi", "beagle",
            "dachshund", "puppy", "horse", "dairy cow", "shark", "grizzly", "polar bear",
            "brown bear", "panda", "hippo", "rhino", "giraffe", "gorilla", "moose", "bison",
            "walrus", "crocodile", "alligator", "camel", "zebra", "kangaroo", "ostrich", "penguin",
            "dolphin", "orca", "octopus", "squid", "turtle", "tortoise", "eagle", "manatee",
            "dinosaur", "saurus", "t-rex", "triceratops", "velociraptor", "titanoboa", "megalodon",
            "mammoth",
        ],
    },
    CategoryRule {
        tag: CategoryTag::Vehicles,
        keywords: &[
            "truck", "pickup", "sedan", "minivan", "sports car", "race car", "compact car",
            "smart car", "police car", "mini cooper", "tesla", "ferrari", "lamborghini",
            "limousine", "humvee", "school bus", "double-decker bus", "city bus", "locomotive",
            "train", "battle tank", "abrams", "jumbo jet", "fighter jet", "boeing", "airbus",
            "cessna", "f-22", "helicopter", "submarine", "battleship", "cruise ship",
            "container ship", "yacht", "sailboat", "canoe", "kayak", "aircraft", "titanic",
            "bicycle", "motorcycle", "scooter", "tractor", "bulldozer", "excavator", "crane",
            "forklift", "golf cart", "snowmobile", "zeppelin", "blimp", "hot air balloon",
            "ambulance",
        ],
    },
    CategoryRule {
        tag: CategoryTag::People,
        keywords: &[
            "person", "human", "woman", "adult", "child", "baby", "toddler", "sumo", "wrestler",
            "linebacker", "astronaut", "firefighter", "strongman", "bodybuilder", "people", "crowd",
            "soldier", "knight",
        ],
    },
    CategoryRule {
        tag: CategoryTag::Fictional,
        keywords: &[
            "godzilla", "king kong", "kaiju", "dragon", "unicorn", "giant", "troll", "ogre",
            "robot", "megazord", "gundam", "jaeger", "transformer", "optimus", "kraken",
            "leviathan", "golem", "hydra", "phoenix", "yeti", "bigfoot", "sasquatch", "superman",
            "batmobile", "tardis", "mothra",
        ],
    },
];

/// Derives a category from a free-text item name.
///
/// Exact Pokémon names win first, then franchise rules, then general rules, in
/// declaration order. Names nothing matches are `objects`.
pub fn categorize(name: &str) -> CategoryTag {
    let normalized = name.trim().to_lowercase();

    if POKEMON_NAMES.contains(&normalized.as_str()) {
        return CategoryTag::Pokemon;
    }

    FRANCHISE_RULES
        .iter()
        .chain(GENERAL_RULES)
        .find(|rule| rule.matches(&normalized))
        .map(|rule| rule.tag)
        .unwrap_or(CategoryTag::Objects)
}

#[cfg(test)]
mod tests {
    use super::{CategoryTag, categorize, parse_category_list};

    #[test]
    fn categorize_franchise_character() {
        assert_eq!(categorize("Chewbacca"), CategoryTag::StarWars);
        assert_eq!(categorize("CHEWBACCA"), CategoryTag::StarWars);
    }

    #[test]
    fn unmatched_name_defaults_to_objects() {
        assert_eq!(categorize("random widget"), CategoryTag::Objects);
        assert_eq!(categorize(""), CategoryTag::Objects);
    }

    #[test]
    fn pokemon_requires_exact_name() {
        assert_eq!(categorize("Golem"), CategoryTag::Pokemon);
        assert_eq!(categorize("  snorlax "), CategoryTag::Pokemon);
        assert_eq!(categorize("Iron Golem"), CategoryTag::Minecraft);
        assert_eq!(categorize("clay golem statue"), CategoryTag::Buildings);
    }

    #[test]
    fn franchise_rules_run_before_general_rules() {
        assert_eq!(categorize("Iron Man Mark 50 suit"), CategoryTag::Marvel);
        assert_eq!(categorize("Mjolnir"), CategoryTag::Marvel);
        assert_eq!(categorize("Master Chief in Mjolnir armor"), CategoryTag::Halo);
        assert_eq!(categorize("Knight Bus"), CategoryTag::HarryPotter);
        assert_eq!(categorize("Hippogriff"), CategoryTag::HarryPotter);
        assert_eq!(categorize("Ender Dragon"), CategoryTag::Minecraft);
    }

    #[test]
    fn general_rules_follow_declared_order() {
        assert_eq!(categorize("Millennium Falcon"), CategoryTag::StarWars);
        assert_eq!(categorize("Falcon 9 booster"), CategoryTag::Space);
        assert_eq!(categorize("SpaceX Dragon capsule"), CategoryTag::Space);
        assert_eq!(categorize("Tyrannosaurus rex"), CategoryTag::Animals);
        assert_eq!(categorize("F-22 Raptor"), CategoryTag::Vehicles);
        assert_eq!(categorize("house cat"), CategoryTag::Animals);
        assert_eq!(categorize("sumo wrestler"), CategoryTag::People);
        assert_eq!(categorize("giant squid"), CategoryTag::Animals);
        assert_eq!(categorize("frost giant"), CategoryTag::Fictional);
    }

    #[test]
    fn tags_round_trip_through_their_string_form() {
        for tag in CategoryTag::ALL {
            assert_eq!(tag.as_str().parse::<CategoryTag>().expect("known tag"), tag);
            assert_eq!(
                serde_json::to_string(&tag).expect("serialize tag"),
                format!("\"{}\"", tag.as_str())
            );
        }
    }

    #[test]
    fn parse_category_list_skips_unknown_and_duplicates() {
        let tags = parse_category_list(&["Star Wars", "bogus", "star-wars", "D&D"]);
        assert_eq!(tags, vec![CategoryTag::StarWars, CategoryTag::Dnd]);
    }
}
