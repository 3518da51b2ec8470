//! Built-in question catalog.
//!
//! Answers are listed from rank 1 to rank 10.

pub(super) const GENERAL: &[(&str, [&str; 10])] = &[
    (
        "Most spoken languages in the world",
        [
            "English", "Mandarin", "Hindi", "Spanish", "French", "Arabic", "Bengali",
            "Portuguese", "Russian", "Urdu",
        ],
    ),
    (
        "Most populous countries",
        [
            "India", "China", "United States", "Indonesia", "Pakistan", "Nigeria",
            "Brazil", "Bangladesh", "Russia", "Mexico",
        ],
    ),
];

pub(super) const BUILTIN_CATALOG: &[(&str, &[(&str, [&str; 10])])] = &[
    ("general", GENERAL),
    (
        "sports",
        &[
            (
                "Most watched sports worldwide",
                [
                    "Soccer", "Cricket", "Basketball", "Tennis", "Volleyball", "Table Tennis",
                    "Baseball", "Golf", "American Football", "Rugby",
                ],
            ),
            (
                "Countries with the most Olympic gold medals",
                [
                    "United States", "Soviet Union", "Germany", "Great Britain", "China",
                    "France", "Italy", "Sweden", "Norway", "Russia",
                ],
            ),
        ],
    ),
    (
        "movies",
        &[
            (
                "Highest grossing films of all time",
                [
                    "Avatar", "Avengers: Endgame", "Avatar: The Way of Water", "Titanic",
                    "Star Wars: The Force Awakens", "Avengers: Infinity War",
                    "Spider-Man: No Way Home", "Inside Out 2", "Jurassic World",
                    "The Lion King",
                ],
            ),
            (
                "Directors with the most Academy Award nominations",
                [
                    "William Wyler", "Martin Scorsese", "Billy Wilder", "David Lean",
                    "Fred Zinnemann", "Steven Spielberg", "Woody Allen", "Frank Capra",
                    "John Ford", "Stanley Kubrick",
                ],
            ),
        ],
    ),
    (
        "food",
        &[
            (
                "Most consumed fruits in the world",
                [
                    "Banana", "Watermelon", "Apple", "Orange", "Grape", "Mango", "Pineapple",
                    "Papaya", "Pear", "Peach",
                ],
            ),
            (
                "Most popular pizza toppings",
                [
                    "Pepperoni", "Sausage", "Mushrooms", "Bacon", "Onions", "Extra Cheese",
                    "Black Olives", "Green Peppers", "Pineapple", "Spinach",
                ],
            ),
        ],
    ),
];
